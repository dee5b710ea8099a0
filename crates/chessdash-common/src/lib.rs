//! # chessdash common
//!
//! Shared error type, logging setup and test helpers used by every crate in the
//! chessdash workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod macros;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{ChessDashError, Result};
pub use logging::{init_logging, ConsoleFormat, LoggingConfig};
