//! Test utilities and shared test helpers for chessdash.
//!
//! Enabled for other crates through the `testing` feature.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test; only the first call installs
/// the subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Build a local timestamp at the given UTC offset (in whole hours).
pub fn mock_local_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    offset_hours: i32,
) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .expect("offset within a day")
        .with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .expect("unambiguous fixed-offset timestamp")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` \
         (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}
