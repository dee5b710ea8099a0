//! Application configuration structures

use chessdash_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whose games are analysed and in which local time
    pub player: PlayerConfig,

    /// Facet filters applied before aggregation
    pub filter: FilterConfig,

    /// Default month window selection
    pub window: WindowConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Player configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PlayerConfig {
    /// chess.com username; games are scored from this player's side
    pub username: String,

    /// IANA time zone used to resolve game end times
    #[validate(custom(
        function = "crate::validation::validate_timezone",
        message = "Timezone must be a valid IANA name such as Europe/Berlin"
    ))]
    pub timezone: String,
}

/// Filter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FilterConfig {
    /// First month included, `YYYY-MM`
    #[validate(regex(
        path = "crate::validation::MONTH_REGEX",
        message = "Month start must look like 2024-01"
    ))]
    pub month_start: Option<String>,

    /// Last month included, `YYYY-MM`
    #[validate(regex(
        path = "crate::validation::MONTH_REGEX",
        message = "Month end must look like 2024-12"
    ))]
    pub month_end: Option<String>,

    /// `Some(true)` keeps rated games only, `Some(false)` unrated only, `None` both
    pub rated_only: Option<bool>,

    /// chess.com time classes to keep (bullet, blitz, rapid, daily)
    #[validate(custom(
        function = "crate::validation::validate_no_blank_entries",
        message = "Time classes cannot contain blank entries"
    ))]
    pub time_classes: Option<Vec<String>>,

    /// Normalized time-control labels to keep (e.g. "3+2 min")
    pub time_labels: Option<Vec<String>>,
}

/// Default month window: start with the latest `initial_months` and widen by
/// `widen_months` until at least `min_games` games are covered.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WindowConfig {
    /// Months in the initial window
    #[validate(range(
        min = 1,
        max = 600,
        message = "Initial window must be between 1 and 600 months"
    ))]
    pub initial_months: u32,

    /// Months added per widening step
    #[validate(range(
        min = 1,
        max = 600,
        message = "Widening step must be between 1 and 600 months"
    ))]
    pub widen_months: u32,

    /// Game count the window should reach
    pub min_games: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            timezone: "UTC".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            initial_months: 12,
            widen_months: 12,
            min_games: 1000,
        }
    }
}

impl FilterConfig {
    /// Cross-field checks that the derive cannot express
    pub fn validate_range(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        // Zero-padded YYYY-MM labels order lexically.
        if let (Some(start), Some(end)) = (&self.month_start, &self.month_end) {
            if start > end {
                let mut err = ValidationError::new("month_range_inverted");
                err.message = Some(format!("Month start {start} is after month end {end}").into());
                errors.add("month_start", err);
            }
        }

        if matches!(&self.time_labels, Some(labels) if labels.iter().any(|l| l.trim().is_empty())) {
            errors.add("time_labels", ValidationError::new("blank_entry"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.player.validate()?;
        self.filter.validate()?;
        self.filter.validate_range()?;
        self.window.validate()?;

        if let Err(err) = crate::validation::validate_log_level(&self.logging.level) {
            let mut errors = ValidationErrors::new();
            errors.add("logging.level", err);
            return Err(errors);
        }

        Ok(())
    }
}
