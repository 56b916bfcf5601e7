use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses the timestamp formats the wager store is known to emit.
///
/// RFC 3339 values keep the wall-clock time written in the string (the offset is
/// dropped, not converted), so hour-of-day buckets match what the bettor saw.
/// Date-only values resolve to midnight.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, CoreError> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CoreError::InvalidTimestamp(raw.to_string()))
}

/// `parse_timestamp` for optional store fields; absent or malformed values are `None`.
pub fn parse_optional(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(|value| parse_timestamp(value).ok())
}
