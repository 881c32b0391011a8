//! Provider timestamp parsing.
//!
//! Schedule providers disagree on timestamp layout: some send
//! `2026-02-01T12:35+01:00`, some use a space separator, some include
//! seconds, some use a `Z` suffix for UTC and some omit the offset
//! entirely. Everything funnels through here so the rest of the crate only
//! sees `chrono` values.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Error returned when a provider timestamp cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimestampError {
    input: String,
    reason: &'static str,
}

impl TimestampError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Replace a space date/time separator with `T` and a `Z` suffix with `+00:00`.
fn normalize(s: &str) -> String {
    let mut normalized = s.trim().replacen(' ', "T", 1);
    if normalized.ends_with('Z') {
        normalized.pop();
        normalized.push_str("+00:00");
    }
    normalized
}

/// Parse a timestamp that carries an explicit UTC offset.
///
/// # Examples
///
/// ```
/// use itinerary_engine::domain::parse_offset_timestamp;
///
/// let t = parse_offset_timestamp("2026-02-01T12:35+01:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2026-02-01T12:35:00+01:00");
///
/// let utc = parse_offset_timestamp("2026-02-01 11:35Z").unwrap();
/// assert_eq!(t, utc);
/// ```
pub fn parse_offset_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let normalized = normalize(s);
    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&normalized, format).ok())
        .ok_or_else(|| TimestampError::new(s, "expected date, time and UTC offset"))
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    let normalized = normalize(s);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
}

/// Parse a timestamp, interpreting it in `tz` when it carries no offset.
///
/// An explicit offset always wins, so the local wall-clock time the
/// provider sent is preserved verbatim.
pub fn parse_timestamp_in(s: &str, tz: Tz) -> Result<DateTime<FixedOffset>, TimestampError> {
    if let Ok(with_offset) = parse_offset_timestamp(s) {
        return Ok(with_offset);
    }

    let naive =
        parse_naive(s).ok_or_else(|| TimestampError::new(s, "expected date and time"))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|t| t.fixed_offset())
        .ok_or_else(|| TimestampError::new(s, "local time does not exist in timezone"))
}

/// Parse a timestamp and keep only its local wall-clock part.
///
/// # Examples
///
/// ```
/// use itinerary_engine::domain::parse_local_timestamp;
///
/// let t = parse_local_timestamp("2025-09-20T06:33:00+02:00").unwrap();
/// assert_eq!(t.to_string(), "2025-09-20 06:33:00");
/// ```
pub fn parse_local_timestamp(s: &str) -> Result<NaiveDateTime, TimestampError> {
    match parse_offset_timestamp(s) {
        Ok(with_offset) => Ok(with_offset.naive_local()),
        Err(_) => parse_naive(s).ok_or_else(|| TimestampError::new(s, "expected date and time")),
    }
}
