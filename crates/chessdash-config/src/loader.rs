//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "CHESSDASH_CONFIG_PATH";

/// Files probed in the working directory when no path is given
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["chessdash.yaml", "chessdash.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Offending variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for chessdash_common::ChessDashError {
    fn from(err: ConfigError) -> Self {
        chessdash_common::ChessDashError::config_with_source("Configuration loading failed", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |key| env::var(key).ok())
    }

    /// Load configuration from a YAML file, resolving overrides through `lookup`
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "parsed configuration file");

        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from `CHESSDASH_CONFIG_PATH`, a default file, or defaults
    pub fn load() -> chessdash_common::Result<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if let Some(path) = DEFAULT_CONFIG_FILES.iter().find(|p| Path::new(p).exists()) {
            Self::load_config(path)?
        } else {
            info!("no configuration file found, using defaults");
            let mut config = Config::default();
            Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
            config.validate_all().map_err(ConfigError::from)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> chessdash_common::Result<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment-style overrides to configuration
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = lookup("CHESSDASH_USERNAME") {
            config.player.username = username;
        }

        if let Some(timezone) = lookup("CHESSDASH_TIMEZONE") {
            config.player.timezone = timezone;
        }

        if let Some(start) = lookup("CHESSDASH_MONTH_START") {
            config.filter.month_start = Some(start);
        }

        if let Some(end) = lookup("CHESSDASH_MONTH_END") {
            config.filter.month_end = Some(end);
        }

        if let Some(rated) = lookup("CHESSDASH_RATED_ONLY") {
            config.filter.rated_only = Some(rated.trim().parse().map_err(|e| {
                ConfigError::EnvParseError {
                    var: "CHESSDASH_RATED_ONLY".to_string(),
                    source: Box::new(e),
                }
            })?);
        }

        if let Some(classes) = lookup("CHESSDASH_TIME_CLASSES") {
            config.filter.time_classes = Some(split_list(&classes));
        }

        if let Some(min_games) = lookup("CHESSDASH_MIN_GAMES") {
            config.window.min_games = min_games.trim().parse().map_err(|e| {
                ConfigError::EnvParseError {
                    var: "CHESSDASH_MIN_GAMES".to_string(),
                    source: Box::new(e),
                }
            })?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
