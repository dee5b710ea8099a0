//! # chessdash analytics
//!
//! Game tables, facet filtering and the temporal aggregation engine that turns
//! a player's games into outcome shares per hour, weekday, month and year.
//!
//! ```rust
//! use chessdash_analytics::{aggregate, Dimension, GameRecord, GameTable, Outcome};
//! use chrono::{FixedOffset, TimeZone};
//!
//! let at = |h| FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap();
//! let table: GameTable = vec![
//!     GameRecord::new(at(14), Outcome::Win),
//!     GameRecord::new(at(14), Outcome::Loss),
//! ]
//! .into();
//!
//! let rows = aggregate(&table, Dimension::Hour).unwrap();
//! assert_eq!(rows[0].label, "14 (2)");
//! assert_eq!(rows[0].share_pct, 50.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod dimension;
pub mod filter;
pub mod game;
pub mod import;

pub use aggregator::{
    aggregate, aggregate_all, AggregationRow, TemporalAggregator, TemporalBreakdown,
};
pub use dimension::{weekday_name, BucketKey, Dimension};
pub use filter::{
    available_months, default_month_window, month_bounds, time_control_options, MonthRange,
    TimeControlOption, TimeFilter, YearMonth,
};
pub use game::{order_time_classes, time_label, GameRecord, GameTable, Outcome, Side};
pub use import::{load_archive, load_archive_file, ArchiveImporter, ImportSummary};
