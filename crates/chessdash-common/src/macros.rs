//! Early-return macros for `ChessDashError`
//!
//! A string literal or format string becomes a generic error; any other
//! expression is converted with `Into<ChessDashError>`, so a typed error can be
//! returned as is.

/// Return early with an error
///
/// # Examples
///
/// ```rust
/// use chessdash_common::{bail, ChessDashError, Result};
///
/// fn pick_side(white: bool, black: bool) -> Result<&'static str> {
///     match (white, black) {
///         (true, _) => Ok("white"),
///         (_, true) => Ok("black"),
///         _ => bail!(ChessDashError::import("player is on neither side")),
///     }
/// }
///
/// assert!(pick_side(false, false).is_err());
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::ChessDashError::new($msg))
    };
    ($err:expr $(,)?) => {
        return Err(::std::convert::Into::<$crate::ChessDashError>::into($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::ChessDashError::new(format!($fmt, $($arg)*)))
    };
}

/// Return early with an error unless a condition holds
///
/// # Examples
///
/// ```rust
/// use chessdash_common::{ensure, ChessDashError, Result};
///
/// fn month_number(month: u32) -> Result<u32> {
///     ensure!(
///         (1..=12).contains(&month),
///         ChessDashError::validation_field(format!("month {month} is out of range"), "month")
///     );
///     Ok(month)
/// }
///
/// assert!(month_number(13).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::ChessDashError::new($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err(::std::convert::Into::<$crate::ChessDashError>::into($err));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::ChessDashError::new(format!($fmt, $($arg)*)));
        }
    };
}

/// Wrap an error with a message, keeping it as the source
///
/// # Examples
///
/// ```rust
/// use chessdash_common::{with_context, Result};
///
/// fn read_archive(path: &str) -> Result<String> {
///     std::fs::read_to_string(path)
///         .map_err(|e| with_context!(e, "Failed to read archive {}", path))
/// }
///
/// assert!(read_archive("/no/such/archive.json").is_err());
/// ```
#[macro_export]
macro_rules! with_context {
    ($err:expr, $msg:literal $(,)?) => {
        $crate::ChessDashError::with_source($msg, $err)
    };
    ($err:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::ChessDashError::with_source(format!($fmt, $($arg)*), $err)
    };
}

#[cfg(test)]
mod tests {
    use crate::{ChessDashError, Result};

    fn first_game(games: &[&str]) -> Result<String> {
        if games.is_empty() {
            bail!("archive contains no games");
        }
        Ok(games[0].to_string())
    }

    fn dimension(name: &str) -> Result<&'static str> {
        match name {
            "hour" => Ok("hour"),
            other => bail!(ChessDashError::invalid_dimension(other)),
        }
    }

    fn rating(value: i64) -> Result<i64> {
        ensure!(value >= 0, "rating cannot be negative: {}", value);
        ensure!(
            value < 4000,
            ChessDashError::validation_field(format!("rating {value} is implausible"), "rating")
        );
        Ok(value)
    }

    #[test]
    fn bail_with_literal_gives_generic_error() {
        let err = first_game(&[]).unwrap_err();
        assert!(matches!(err, ChessDashError::Generic { .. }));
        assert_eq!(err.to_string(), "archive contains no games");
        assert_eq!(first_game(&["g1"]).unwrap(), "g1");
    }

    #[test]
    fn bail_with_typed_error_keeps_variant() {
        let err = dimension("minute").unwrap_err();
        assert!(matches!(err, ChessDashError::InvalidDimension { .. }));
    }

    #[test]
    fn ensure_formats_or_converts() {
        assert_eq!(rating(1500).unwrap(), 1500);

        let negative = rating(-1).unwrap_err();
        assert_eq!(negative.to_string(), "rating cannot be negative: -1");

        let huge = rating(9000).unwrap_err();
        assert!(matches!(
            huge,
            ChessDashError::Validation { field: Some(ref f), .. } if f == "rating"
        ));
    }

    #[test]
    fn with_context_keeps_source() {
        use std::error::Error;
        use std::io;

        let cause = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = with_context!(cause, "Failed to read {}", "games.json");

        assert_eq!(err.to_string(), "Failed to read games.json");
        assert!(err.source().is_some());
    }
}
