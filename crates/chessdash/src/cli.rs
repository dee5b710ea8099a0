//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

/// Print hour, weekday, month and year outcome breakdowns of a chess.com archive
#[derive(Parser, Debug)]
#[command(name = "chessdash", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only print one dimension (hour, weekday, month, year)
    #[arg(short, long)]
    pub dimension: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Log level, overriding the configuration
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Narrow to the default month window when no month range is configured
    #[arg(long)]
    pub default_window: bool,

    /// chess.com archive JSON file
    pub archive: PathBuf,
}
