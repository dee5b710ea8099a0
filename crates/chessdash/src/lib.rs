//! # chessdash
//!
//! Loads a saved chess.com archive, applies the configured filters and renders
//! the temporal breakdowns as JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;

pub use cli::Args;

use anyhow::{Context, Result};
use chessdash_analytics::{
    default_month_window, AggregationRow, ArchiveImporter, Dimension, TemporalAggregator,
    TemporalBreakdown, TimeFilter,
};
use chessdash_config::Config;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Rows keyed by dimension name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// The one dimension asked for with `--dimension`
    Single(BTreeMap<&'static str, Vec<AggregationRow>>),
    /// Every dimension, in hour, weekday, month, year order
    Breakdown(TemporalBreakdown),
}

/// Import, filter and aggregate the archive named by `args`
pub fn build_report(args: &Args, config: &Config) -> Result<Report> {
    let importer = ArchiveImporter::from_config(&config.player)
        .context("invalid player configuration")?;
    let (table, summary) = importer
        .import_file(&args.archive)
        .with_context(|| format!("failed to import {}", args.archive.display()))?;
    info!(games = summary.imported, "Loaded archive");

    let mut filter =
        TimeFilter::from_config(&config.filter).context("invalid filter configuration")?;
    if args.default_window && filter.months.is_unbounded() {
        if let Some(window) = default_month_window(&table, &config.window) {
            info!(start = ?window.start, end = ?window.end, "Using default month window");
            filter.months = window;
        }
    }
    let filtered = filter.apply(&table);

    let aggregator = TemporalAggregator::new();
    let report = match args.dimension.as_deref() {
        Some(name) => {
            let dimension = Dimension::parse(name)?;
            let rows = aggregator.aggregate(&filtered, dimension)?;
            Report::Single(BTreeMap::from([(dimension.as_str(), rows)]))
        }
        None => Report::Breakdown(aggregator.aggregate_all(&filtered)?),
    };

    Ok(report)
}

/// Build the report and serialize it
pub fn render_report(args: &Args, config: &Config) -> Result<String> {
    let report = build_report(args, config)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}
