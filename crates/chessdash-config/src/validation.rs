//! Validation utilities and regex patterns

use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for `YYYY-MM` month labels (e.g., 2024-03)
pub static MONTH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("Invalid month regex pattern")
});

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validate an IANA time zone name against the chrono-tz database
pub fn validate_timezone(timezone: &str) -> Result<(), ValidationError> {
    if timezone.is_empty() {
        return Err(ValidationError::new("empty_timezone"));
    }

    timezone
        .parse::<Tz>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_timezone"))
}

/// Validate a log filter: a bare level or comma separated `target=level` directives
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if level.trim().is_empty() {
        return Err(ValidationError::new("empty_log_level"));
    }

    let valid = level.split(',').all(|directive| {
        let level = directive
            .rsplit_once('=')
            .map_or(directive, |(_, level)| level)
            .trim()
            .to_ascii_lowercase();
        LOG_LEVELS.contains(&level.as_str())
    });

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate that no entry of a list is blank
pub fn validate_no_blank_entries(entries: &[String]) -> Result<(), ValidationError> {
    if entries.iter().any(|e| e.trim().is_empty()) {
        Err(ValidationError::new("blank_entry"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_regex() {
        assert!(MONTH_REGEX.is_match("2024-01"));
        assert!(MONTH_REGEX.is_match("1999-12"));

        assert!(!MONTH_REGEX.is_match("2024-13"));
        assert!(!MONTH_REGEX.is_match("2024-00"));
        assert!(!MONTH_REGEX.is_match("2024-1"));
        assert!(!MONTH_REGEX.is_match("24-01"));
        assert!(!MONTH_REGEX.is_match("2024/01"));
        assert!(!MONTH_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("Europe/Berlin").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());

        assert!(validate_timezone("").is_err());
        assert!(validate_timezone("Mars/Olympus_Mons").is_err());
        assert!(validate_timezone("Europe").is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("chessdash_analytics=trace").is_ok());
        assert!(validate_log_level("warn,chessdash=debug").is_ok());

        assert!(validate_log_level("").is_err());
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("chessdash=loud").is_err());
    }

    #[test]
    fn test_validate_no_blank_entries() {
        assert!(validate_no_blank_entries(&["blitz".to_string()]).is_ok());
        assert!(validate_no_blank_entries(&[]).is_ok());
        assert!(validate_no_blank_entries(&["blitz".to_string(), "  ".to_string()]).is_err());
    }
}
