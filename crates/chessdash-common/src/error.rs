//! Error types and utilities for chessdash

use thiserror::Error;

/// Result type alias for chessdash operations
pub type Result<T> = std::result::Result<T, ChessDashError>;

/// Main error type for chessdash operations
#[derive(Error, Debug)]
pub enum ChessDashError {
    /// A bucketing dimension outside hour, weekday, month and year was requested
    #[error("Invalid dimension: '{value}' (expected one of hour, weekday, month, year)")]
    InvalidDimension {
        /// The rejected dimension name
        value: String,
    },

    /// A game row reached the aggregator without a required field
    #[error("Missing field '{field}' in game row {row}")]
    MissingField {
        /// Index of the offending row in the input table
        row: usize,
        /// Name of the absent field
        field: &'static str,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the problem
        message: String,
        /// Offending field, if known
        field: Option<String>,
    },

    /// Archive import errors
    #[error("Import error: {message}")]
    Import {
        /// Description of the problem
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unknown IANA time zone name
    #[error("Unknown time zone: '{name}'")]
    Timezone {
        /// The rejected zone name
        name: String,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Description of the problem
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ChessDashError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid dimension error
    pub fn invalid_dimension(value: impl Into<String>) -> Self {
        Self::InvalidDimension {
            value: value.into(),
        }
    }

    /// Create a missing field error for the given row
    pub fn missing_field(row: usize, field: &'static str) -> Self {
        Self::MissingField { row, field }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new import error
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new import error with source
    pub fn import_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Import {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an unknown time zone error
    pub fn timezone(name: impl Into<String>) -> Self {
        Self::Timezone { name: name.into() }
    }

    /// Whether this error signals a broken caller contract rather than bad external data
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidDimension { .. } | Self::MissingField { .. })
    }
}

impl From<String> for ChessDashError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ChessDashError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
