//! Calendar dimensions and bucket keys

use chessdash_common::{ChessDashError, Result};
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Calendar dimension games are bucketed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Hour of day, 0 to 23
    Hour,
    /// Day of week, Monday first
    Weekday,
    /// Month of year, 1 to 12
    Month,
    /// Calendar year
    Year,
}

impl Dimension {
    /// All dimensions in breakdown order
    pub const ALL: [Dimension; 4] = [
        Dimension::Hour,
        Dimension::Weekday,
        Dimension::Month,
        Dimension::Year,
    ];

    /// Parse a dimension name, case-insensitively
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hour" | "hourofday" => Ok(Dimension::Hour),
            "weekday" | "dayofweek" => Ok(Dimension::Weekday),
            "month" => Ok(Dimension::Month),
            "year" => Ok(Dimension::Year),
            _ => Err(ChessDashError::invalid_dimension(name)),
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Hour => "hour",
            Dimension::Weekday => "weekday",
            Dimension::Month => "month",
            Dimension::Year => "year",
        }
    }

    /// Chart axis title
    pub fn axis_title(self) -> &'static str {
        match self {
            Dimension::Hour => "Hours",
            Dimension::Weekday => "Weekdays",
            Dimension::Month => "Months",
            Dimension::Year => "Years",
        }
    }

    /// Derive the bucket key of a local timestamp
    pub fn bucket_key(self, ts: &DateTime<FixedOffset>) -> BucketKey {
        match self {
            Dimension::Hour => BucketKey::Hour(ts.hour()),
            Dimension::Weekday => BucketKey::Weekday(ts.weekday()),
            Dimension::Month => BucketKey::Month(ts.month()),
            Dimension::Year => BucketKey::Year(ts.year()),
        }
    }
}

impl FromStr for Dimension {
    type Err = ChessDashError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw dimension value of a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// Hour of day
    Hour(u32),
    /// Day of week
    Weekday(Weekday),
    /// Month of year
    Month(u32),
    /// Calendar year
    Year(i32),
}

impl BucketKey {
    /// Dimension this key belongs to
    pub fn dimension(&self) -> Dimension {
        match self {
            BucketKey::Hour(_) => Dimension::Hour,
            BucketKey::Weekday(_) => Dimension::Weekday,
            BucketKey::Month(_) => Dimension::Month,
            BucketKey::Year(_) => Dimension::Year,
        }
    }

    // Weekdays rank Monday first.
    fn rank(&self) -> i64 {
        match self {
            BucketKey::Hour(h) => i64::from(*h),
            BucketKey::Weekday(d) => i64::from(d.num_days_from_monday()),
            BucketKey::Month(m) => i64::from(*m),
            BucketKey::Year(y) => i64::from(*y),
        }
    }
}

/// Full English day name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl Ord for BucketKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.dimension() as u8, self.rank()).cmp(&(other.dimension() as u8, other.rank()))
    }
}

impl PartialOrd for BucketKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Hour(h) => write!(f, "{h}"),
            BucketKey::Weekday(d) => f.write_str(weekday_name(*d)),
            BucketKey::Month(m) => write!(f, "{m}"),
            BucketKey::Year(y) => write!(f, "{y}"),
        }
    }
}

impl Serialize for BucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            BucketKey::Hour(h) | BucketKey::Month(h) => serializer.serialize_u32(*h),
            BucketKey::Weekday(d) => serializer.serialize_str(weekday_name(*d)),
            BucketKey::Year(y) => serializer.serialize_i32(*y),
        }
    }
}
