//! # chessdash config
//!
//! YAML configuration with environment overrides and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, FilterConfig, PlayerConfig, WindowConfig};
