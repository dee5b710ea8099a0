//! Structured logging infrastructure for chessdash

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "chessdash_analytics=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json: bool,
    /// Whether to use the multi-line pretty format on the console
    pub pretty: bool,
    /// Whether to enable ANSI colors on the console
    pub colored: bool,
    /// Optional file path for log output
    pub file: Option<String>,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            pretty: false,
            colored: true,
            file: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Console output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    /// One line per event
    Compact,
    /// Multi-line events with source locations
    Pretty,
    /// One JSON object per event
    Json,
}

impl LoggingConfig {
    /// Layout selected by this configuration; `json` wins over `pretty`
    pub fn console_format(&self) -> ConsoleFormat {
        if self.json {
            ConsoleFormat::Json
        } else if self.pretty {
            ConsoleFormat::Pretty
        } else {
            ConsoleFormat::Compact
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Logs go to stderr so that stdout stays reserved for command output. A log
/// file, when set, replaces the console and never carries ANSI colors.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(&config.level).or_else(|_| EnvFilter::try_new("info"))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(path) = &config.file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        match config.console_format() {
            ConsoleFormat::Json => registry.with(layer.json()).try_init()?,
            ConsoleFormat::Pretty => registry.with(layer.pretty()).try_init()?,
            ConsoleFormat::Compact => registry.with(layer.compact()).try_init()?,
        }
        return Ok(());
    }

    let layer = fmt::layer()
        .with_span_events(span_events)
        .with_target(config.include_targets)
        .with_writer(std::io::stderr);
    match config.console_format() {
        ConsoleFormat::Json => registry.with(layer.json()).try_init()?,
        ConsoleFormat::Pretty => registry
            .with(layer.pretty().with_ansi(config.colored))
            .try_init()?,
        ConsoleFormat::Compact => registry
            .with(layer.compact().with_ansi(config.colored))
            .try_init()?,
    }

    Ok(())
}
