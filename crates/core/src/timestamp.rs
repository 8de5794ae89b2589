//! Timestamp parsing and display formatting.
//!
//! Stored timestamps are UTC. Views render them in a fixed display offset
//! (configured at startup) using [`DISPLAY_FORMAT`].

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::de::{self, Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Output format for presented timestamps, e.g. `2025-09-28 11:48:00`.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display offset used when none is configured (UTC-3).
pub const DEFAULT_DISPLAY_OFFSET_HOURS: i32 = -3;

/// Naive formats accepted on input; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Build a display offset from a whole number of hours east of UTC.
pub fn display_offset(hours: i32) -> Result<FixedOffset, CoreError> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "display offset must be between -23 and 23 hours, got {hours}"
            ))
        })
}

/// Render a stored timestamp in the display offset.
pub fn format_display(ts: &Timestamp, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format(DISPLAY_FORMAT).to_string()
}

/// Parse an RFC 3339 or naive ISO-8601 timestamp.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Deserialize an optional timestamp field.
///
/// Absent, `null` and `""` all yield `None`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp \"{raw}\""))),
    }
}
