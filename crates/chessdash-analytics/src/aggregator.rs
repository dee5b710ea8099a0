//! Temporal aggregation of game outcomes into chart-ready share rows

use crate::dimension::{BucketKey, Dimension};
use crate::game::{GameRecord, GameTable, Outcome};
use chessdash_common::{ChessDashError, Result};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

/// One outcome's share of one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationRow {
    /// Raw dimension value
    pub bucket_key: BucketKey,
    /// Outcome this row measures
    pub outcome: Outcome,
    /// Percentage of the bucket's games with this outcome, in (0, 100]
    pub share_pct: f64,
    /// Games in the bucket
    pub count_in_bucket: u32,
    /// `"<bucket_key> (<count_in_bucket>)"`
    pub label: String,
    /// Stacking position of the outcome
    pub order_key: u8,
}

/// The four breakdowns of one table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemporalBreakdown {
    /// Rows by hour of day
    pub hour: Vec<AggregationRow>,
    /// Rows by day of week
    pub weekday: Vec<AggregationRow>,
    /// Rows by month of year
    pub month: Vec<AggregationRow>,
    /// Rows by year
    pub year: Vec<AggregationRow>,
}

impl TemporalBreakdown {
    /// Rows for one dimension
    pub fn get(&self, dimension: Dimension) -> &[AggregationRow] {
        match dimension {
            Dimension::Hour => &self.hour,
            Dimension::Weekday => &self.weekday,
            Dimension::Month => &self.month,
            Dimension::Year => &self.year,
        }
    }

    /// Iterate dimensions in breakdown order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &[AggregationRow])> {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// Buckets games by a calendar dimension and computes outcome shares
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalAggregator;

impl TemporalAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `table` along `dimension`.
    ///
    /// Buckets come out in natural order (weekdays Monday first) and within a
    /// bucket outcomes follow win, draw, loss. Outcomes absent from a bucket
    /// produce no row.
    #[instrument(skip(self, table), fields(rows = table.len()))]
    pub fn aggregate(
        &self,
        table: &GameTable,
        dimension: Dimension,
    ) -> Result<Vec<AggregationRow>> {
        let games = required_fields(table)?;

        let mut buckets: BTreeMap<BucketKey, [u32; 3]> = BTreeMap::new();
        for (ts, outcome) in games {
            let counts = buckets.entry(dimension.bucket_key(&ts)).or_insert([0; 3]);
            counts[outcome.index()] += 1;
        }

        let mut result = Vec::with_capacity(buckets.len() * Outcome::ALL.len());
        for (key, counts) in &buckets {
            let total: u32 = counts.iter().sum();
            let label = format!("{key} ({total})");
            trace!(bucket = %key, total, "bucket counted");

            for outcome in Outcome::ALL {
                let count = counts[outcome.index()];
                if count == 0 {
                    continue;
                }

                result.push(AggregationRow {
                    bucket_key: *key,
                    outcome,
                    share_pct: 100.0 * f64::from(count) / f64::from(total),
                    count_in_bucket: total,
                    label: label.clone(),
                    order_key: outcome.order_key(),
                });
            }
        }

        debug!(
            "Aggregated {} rows across {} {} buckets",
            result.len(),
            buckets.len(),
            dimension
        );
        Ok(result)
    }

    /// Aggregate along a dimension given by name
    pub fn aggregate_named(
        &self,
        table: &GameTable,
        dimension: &str,
    ) -> Result<Vec<AggregationRow>> {
        self.aggregate(table, Dimension::parse(dimension)?)
    }

    /// Aggregate along all four dimensions
    #[instrument(skip(self, table), fields(rows = table.len()))]
    pub fn aggregate_all(&self, table: &GameTable) -> Result<TemporalBreakdown> {
        Ok(TemporalBreakdown {
            hour: self.aggregate(table, Dimension::Hour)?,
            weekday: self.aggregate(table, Dimension::Weekday)?,
            month: self.aggregate(table, Dimension::Month)?,
            year: self.aggregate(table, Dimension::Year)?,
        })
    }
}

/// Aggregate `table` along `dimension`
pub fn aggregate(table: &GameTable, dimension: Dimension) -> Result<Vec<AggregationRow>> {
    TemporalAggregator::new().aggregate(table, dimension)
}

/// Aggregate `table` along all four dimensions
pub fn aggregate_all(table: &GameTable) -> Result<TemporalBreakdown> {
    TemporalAggregator::new().aggregate_all(table)
}

// Every row is checked before anything is counted.
fn required_fields(table: &GameTable) -> Result<Vec<(DateTime<FixedOffset>, Outcome)>> {
    table
        .iter()
        .enumerate()
        .map(|(row, record)| required_pair(row, record))
        .collect()
}

fn required_pair(row: usize, record: &GameRecord) -> Result<(DateTime<FixedOffset>, Outcome)> {
    let ts = record
        .end_time_local
        .ok_or_else(|| ChessDashError::missing_field(row, "end_time_local"))?;
    let outcome = record
        .user_result_simple
        .ok_or_else(|| ChessDashError::missing_field(row, "user_result_simple"))?;
    Ok((ts, outcome))
}
