//! Timestamp formatting utilities
//!
//! Formats used for the permanent `ts` field of every record.

use super::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// RFC 3339 in UTC with trailing sub-second zeros dropped:
    /// `2025-01-08T10:30:45.12345678Z`
    #[default]
    Rfc3339Nano,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    ///
    /// # Examples
    ///
    /// ```
    /// use logz::TimestampFormat;
    /// use chrono::Utc;
    ///
    /// let ts = TimestampFormat::Rfc3339Nano.format(&Utc::now());
    /// assert!(ts.ends_with('Z'));
    /// ```
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339Nano => rfc3339_nano(datetime),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
        }
    }

    /// Field value for `datetime`; unix formats stay numeric
    #[must_use]
    pub fn to_value(&self, datetime: &DateTime<Utc>) -> Value {
        match self {
            TimestampFormat::Unix => Value::Int(datetime.timestamp()),
            TimestampFormat::UnixMillis => Value::Int(datetime.timestamp_millis()),
            _ => Value::String(self.format(datetime)),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

/// RFC 3339 in UTC keeping only significant sub-second digits
///
/// `10:30:45.520717840` renders as `10:30:45.52071784Z` and a whole second
/// has no fraction at all.
pub(crate) fn rfc3339_nano(datetime: &DateTime<Utc>) -> String {
    let mut out = datetime.format("%Y-%m-%dT%H:%M:%S%.9f").to_string();
    let significant = out.trim_end_matches('0').trim_end_matches('.').len();
    out.truncate(significant);
    out.push('Z');
    out
}
