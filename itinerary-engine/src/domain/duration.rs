//! ISO-8601 duration parsing.
//!
//! Schedule providers report leg durations as ISO-8601 durations such as
//! `PT7H25M`. Only fixed-length units are accepted (weeks, days, hours,
//! minutes, seconds); years and months have no fixed length and are
//! rejected. The result is truncated to whole minutes.

use chrono::Duration;

/// Error returned for a string that is not a fixed ISO-8601 duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed ISO-8601 duration {input:?}: {reason}")]
pub struct MalformedDuration {
    input: String,
    reason: &'static str,
}

impl MalformedDuration {
    /// The offending input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

const DATE_UNITS: &[(char, u64)] = &[('W', 7 * 24 * 3600), ('D', 24 * 3600)];
const TIME_UNITS: &[(char, u64)] = &[('H', 3600), ('M', 60), ('S', 1)];

/// Parse an ISO-8601 duration into whole minutes.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use itinerary_engine::domain::parse_iso8601_duration;
///
/// assert_eq!(parse_iso8601_duration("PT7H25M").unwrap(), Duration::minutes(445));
/// assert_eq!(parse_iso8601_duration("P1DT30M").unwrap(), Duration::minutes(1470));
/// // Seconds are truncated
/// assert_eq!(parse_iso8601_duration("PT90.5S").unwrap(), Duration::minutes(1));
///
/// assert!(parse_iso8601_duration("7H25M").is_err());
/// assert!(parse_iso8601_duration("PT").is_err());
/// ```
pub fn parse_iso8601_duration(input: &str) -> Result<Duration, MalformedDuration> {
    let err = |reason| MalformedDuration {
        input: input.to_string(),
        reason,
    };

    let rest = input
        .strip_prefix('P')
        .ok_or_else(|| err("must start with 'P'"))?;

    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };

    if time_part == Some("") {
        return Err(err("'T' must be followed by a time component"));
    }

    let mut components = 0;
    let mut seconds = sum_components(date_part, DATE_UNITS, &mut components).map_err(err)?;
    if let Some(time) = time_part {
        let time_seconds = sum_components(time, TIME_UNITS, &mut components).map_err(err)?;
        seconds = seconds
            .checked_add(time_seconds)
            .ok_or_else(|| err("duration too large"))?;
    }

    if components == 0 {
        return Err(err("no duration components"));
    }

    let minutes = i64::try_from(seconds / 60).map_err(|_| err("duration too large"))?;
    Duration::try_minutes(minutes).ok_or_else(|| err("duration too large"))
}

/// Sum the `<number><designator>` components of one half of a duration.
///
/// Designators must appear in the order given by `units`, each at most once.
fn sum_components(
    mut part: &str,
    units: &[(char, u64)],
    components: &mut usize,
) -> Result<u64, &'static str> {
    let mut total: u64 = 0;
    let mut next_unit = 0;

    while !part.is_empty() {
        let number_end = part
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(part.len());
        let (number, tail) = part.split_at(number_end);

        let designator = tail
            .chars()
            .next()
            .ok_or("number without unit designator")?;
        if number.is_empty() {
            return Err("unit designator without number");
        }

        let position = units[next_unit..]
            .iter()
            .position(|(unit, _)| *unit == designator);
        let Some(position) = position else {
            return Err(match designator {
                'Y' | 'M' if units.iter().any(|&(unit, _)| unit == 'D') => {
                    "calendar units (years, months) have no fixed length"
                }
                _ => "unexpected or out-of-order unit designator",
            });
        };
        let (unit, unit_seconds) = units[next_unit + position];
        next_unit += position + 1;

        let (whole, fraction) = match number.split_once(['.', ',']) {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (number, None),
        };
        if let Some(fraction) = fraction {
            if unit != 'S' {
                return Err("only seconds may be fractional");
            }
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err("malformed fractional seconds");
            }
        }
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err("malformed number");
        }

        let value: u64 = whole.parse().map_err(|_| "duration too large")?;
        total = value
            .checked_mul(unit_seconds)
            .and_then(|s| total.checked_add(s))
            .ok_or("duration too large")?;
        *components += 1;

        part = &tail[designator.len_utf8()..];
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(s: &str) -> i64 {
        parse_iso8601_duration(s).unwrap().num_minutes()
    }

    #[test]
    fn hours_and_minutes() {
        assert_eq!(minutes("PT7H25M"), 445);
        assert_eq!(minutes("PT1H"), 60);
        assert_eq!(minutes("PT45M"), 45);
        assert_eq!(minutes("PT0M"), 0);
    }

    #[test]
    fn days_and_weeks() {
        assert_eq!(minutes("P1D"), 1440);
        assert_eq!(minutes("P1W"), 7 * 1440);
        assert_eq!(minutes("P1DT2H"), 1440 + 120);
    }

    #[test]
    fn seconds_truncated() {
        assert_eq!(minutes("PT59S"), 0);
        assert_eq!(minutes("PT1M59S"), 1);
        assert_eq!(minutes("PT119.999S"), 1);
        assert_eq!(minutes("PT60,5S"), 1);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(parse_iso8601_duration("").is_err());
        assert!(parse_iso8601_duration("T7H").is_err());
        assert!(parse_iso8601_duration("pt7h").is_err());
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(parse_iso8601_duration("P").is_err());
        assert!(parse_iso8601_duration("PT").is_err());
        assert!(parse_iso8601_duration("P1DT").is_err());
    }

    #[test]
    fn rejects_bad_components() {
        assert!(parse_iso8601_duration("PT7").is_err());
        assert!(parse_iso8601_duration("PTH").is_err());
        assert!(parse_iso8601_duration("PT25M7H").is_err());
        assert!(parse_iso8601_duration("PT1H1H").is_err());
        assert!(parse_iso8601_duration("P7H").is_err());
        assert!(parse_iso8601_duration("PT1.5H").is_err());
        assert!(parse_iso8601_duration("PT1.S").is_err());
        assert!(parse_iso8601_duration("PT-5M").is_err());
        assert!(parse_iso8601_duration("PT7H25M ").is_err());
    }

    #[test]
    fn rejects_calendar_units() {
        let err = parse_iso8601_duration("P1Y").unwrap_err();
        assert!(err.to_string().contains("calendar units"));
        assert!(parse_iso8601_duration("P2M").is_err());
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_iso8601_duration("PT99999999999999999999H").is_err());
        assert!(parse_iso8601_duration("P999999999999999W").is_err());
    }

    #[test]
    fn error_keeps_input() {
        let err = parse_iso8601_duration("7H").unwrap_err();
        assert_eq!(err.input(), "7H");
        assert_eq!(
            err.to_string(),
            "malformed ISO-8601 duration \"7H\": must start with 'P'"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn hours_minutes_seconds(h in 0u64..200, m in 0u64..60, s in 0u64..60) {
            let parsed = parse_iso8601_duration(&format!("PT{h}H{m}M{s}S")).unwrap();
            prop_assert_eq!(parsed.num_minutes() as u64, h * 60 + m);
        }

        #[test]
        fn days_add_to_time(d in 0u64..30, h in 0u64..24) {
            let parsed = parse_iso8601_duration(&format!("P{d}DT{h}H")).unwrap();
            prop_assert_eq!(parsed.num_minutes() as u64, d * 1440 + h * 60);
        }

        #[test]
        fn garbage_never_panics(s in "\\PC{0,16}") {
            let _ = parse_iso8601_duration(&s);
        }
    }
}
