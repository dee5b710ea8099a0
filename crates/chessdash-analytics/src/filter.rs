//! Game table filtering by month range, time control and rated flag

use crate::game::{GameRecord, GameTable};
use chessdash_common::{ensure, ChessDashError, Result};
use chessdash_config::{FilterConfig, WindowConfig};
use chrono::{DateTime, Datelike, FixedOffset};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month, rejecting month numbers outside 1 to 12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ChessDashError::validation_field(
                format!("Month {month} is outside 1-12"),
                "month",
            ));
        }
        Ok(Self { year, month })
    }

    /// Month a local timestamp falls in
    pub fn of(ts: &DateTime<FixedOffset>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of year, 1 to 12
    pub fn month(&self) -> u32 {
        self.month
    }

    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Shift by a signed number of months
    pub fn add_months(&self, months: i64) -> Self {
        Self::from_index(self.index() + months)
    }

    /// Months from `self` through `end`, inclusive
    pub fn through(&self, end: YearMonth) -> Vec<YearMonth> {
        (self.index()..=end.index()).map(Self::from_index).collect()
    }
}

impl FromStr for YearMonth {
    type Err = ChessDashError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid =
            || ChessDashError::validation_field(format!("'{s}' is not a YYYY-MM month"), "month");

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Inclusive month bounds; either side may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthRange {
    /// First month included
    pub start: Option<YearMonth>,
    /// Last month included
    pub end: Option<YearMonth>,
}

impl MonthRange {
    /// Create a range, rejecting a start after the end
    pub fn new(start: Option<YearMonth>, end: Option<YearMonth>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            ensure!(
                s <= e,
                ChessDashError::validation_field(
                    format!("Month range start {s} is after end {e}"),
                    "month_start",
                )
            );
        }
        Ok(Self { start, end })
    }

    /// Unbounded range
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `month` lies within the bounds
    pub fn contains(&self, month: YearMonth) -> bool {
        self.start.map_or(true, |s| month >= s) && self.end.map_or(true, |e| month <= e)
    }
}

/// Facet filter applied to a game table before aggregation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeFilter {
    /// Month bounds on the local end time
    pub months: MonthRange,
    /// Normalized time-control labels to keep; `None` keeps all
    pub time_labels: Option<Vec<String>>,
    /// Time classes to keep, matched case-insensitively; `None` keeps all
    pub time_classes: Option<Vec<String>>,
    /// `Some(true)` rated only, `Some(false)` unrated only
    pub rated_only: Option<bool>,
}

impl TimeFilter {
    /// A filter that keeps every game
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a month range
    pub fn with_months(mut self, months: MonthRange) -> Self {
        self.months = months;
        self
    }

    /// Restrict to the given time-control labels
    pub fn with_time_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to the given time classes
    pub fn with_time_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict by rated flag
    pub fn with_rated_only(mut self, rated: bool) -> Self {
        self.rated_only = Some(rated);
        self
    }

    /// Build a filter from configuration
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        let start = config.month_start.as_deref().map(str::parse::<YearMonth>).transpose()?;
        let end = config.month_end.as_deref().map(str::parse::<YearMonth>).transpose()?;

        Ok(Self {
            months: MonthRange::new(start, end)?,
            time_labels: config.time_labels.clone(),
            time_classes: config.time_classes.clone(),
            rated_only: config.rated_only,
        })
    }

    /// Return the rows that pass every facet. Rows without an end time are
    /// dropped and counted.
    #[instrument(skip(self, table), fields(rows = table.len()))]
    pub fn apply(&self, table: &GameTable) -> GameTable {
        let mut missing_timestamp = 0usize;
        let filtered = table.retain_cloned(|record| {
            if record.end_time_local.is_none() {
                missing_timestamp += 1;
                return false;
            }
            self.matches(record)
        });

        if missing_timestamp > 0 {
            info!("Ignored {} games with missing timestamp", missing_timestamp);
        }
        info!("Filter kept {} of {} games", filtered.len(), table.len());
        filtered
    }

    /// Whether a single record passes every facet
    pub fn matches(&self, record: &GameRecord) -> bool {
        let in_range = record
            .end_time_local
            .is_some_and(|ts| self.months.contains(YearMonth::of(&ts)));

        let label_ok = self
            .time_labels
            .as_ref()
            .map_or(true, |labels| labels.contains(&record.time_label()));

        let class_ok = self.time_classes.as_ref().map_or(true, |classes| {
            let class = record.time_class.as_deref().unwrap_or("unknown");
            classes.iter().any(|c| c.eq_ignore_ascii_case(class))
        });

        let rated_ok = self.rated_only.map_or(true, |rated| record.rated == rated);

        in_range && label_ok && class_ok && rated_ok
    }
}

/// A selectable time-control label with its game count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeControlOption {
    /// Normalized label
    pub label: String,
    /// Games with this label
    pub count: usize,
}

impl TimeControlOption {
    /// `"<label> (<count>)"`
    pub fn display(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }
}

/// Time-control labels in the table, most played first
pub fn time_control_options(table: &GameTable) -> Vec<TimeControlOption> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in table {
        *counts.entry(record.time_label()).or_insert(0) += 1;
    }

    let mut options: Vec<TimeControlOption> = counts
        .into_iter()
        .map(|(label, count)| TimeControlOption { label, count })
        .collect();
    options.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    options
}

/// First and last month with a timestamped game
pub fn month_bounds(table: &GameTable) -> Option<(YearMonth, YearMonth)> {
    let months = table
        .iter()
        .filter_map(|r| r.end_time_local.as_ref().map(YearMonth::of));

    months.fold(None, |acc, m| match acc {
        None => Some((m, m)),
        Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
    })
}

/// Every month from the first to the last game, gaps included
pub fn available_months(table: &GameTable) -> Vec<YearMonth> {
    month_bounds(table).map_or_else(Vec::new, |(first, last)| first.through(last))
}

/// Default month window: the latest `initial_months`, widened backwards by
/// `widen_months` until it covers `min_games` games or the whole history.
#[instrument(skip(table, window), fields(rows = table.len()))]
pub fn default_month_window(table: &GameTable, window: &WindowConfig) -> Option<MonthRange> {
    let (first, last) = month_bounds(table)?;

    let mut per_month: HashMap<YearMonth, u32> = HashMap::new();
    for ts in table.iter().filter_map(|r| r.end_time_local.as_ref()) {
        *per_month.entry(YearMonth::of(ts)).or_insert(0) += 1;
    }
    let count_from = |start: YearMonth| -> u32 {
        per_month
            .iter()
            .filter(|(m, _)| **m >= start)
            .map(|(_, n)| *n)
            .sum()
    };

    let initial = i64::from(window.initial_months.max(1));
    let widen = i64::from(window.widen_months.max(1));

    let mut start = last.add_months(1 - initial).max(first);
    while count_from(start) < window.min_games && start > first {
        start = start.add_months(-widen).max(first);
    }

    debug!(%start, end = %last, games = count_from(start), "Selected default month window");
    Some(MonthRange {
        start: Some(start),
        end: Some(last),
    })
}
