//! Reconstruction of missing flight endpoint timestamps.
//!
//! Providers frequently report only one side of a leg. Given the known side,
//! the scheduled duration and the timezone of the other airport, the missing
//! side can be rebuilt exactly: instants are compared in absolute time and
//! only rendered into local wall-clock time at the very end.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;

use super::schedule::Timing;

/// Not enough information to place both ends of a leg in time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncompleteLegData {
    #[error("neither departure nor arrival time is known")]
    NoTimestamps,

    #[error("only one endpoint time is known and no duration was supplied")]
    NoDuration,

    #[error("the timezone needed to rebuild the missing endpoint time is unknown")]
    NoTimezone,

    #[error("duration {minutes} min puts the missing endpoint time out of range")]
    OutOfRange { minutes: i64 },
}

/// Both endpoints of a leg, as local wall-clock times, plus the block time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledTimes {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub duration: Duration,
}

/// One end of a leg: the instant if the provider reported it, and the
/// timezone of the airport if known.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub known: Option<DateTime<FixedOffset>>,
    pub timezone: Option<Tz>,
}

/// Pick the timing to use from a provider's list.
///
/// The entry with the `preferred` qualifier wins; otherwise the first entry.
pub fn select_timing<'a>(timings: &'a [Timing], preferred: &str) -> Option<&'a Timing> {
    timings
        .iter()
        .find(|t| t.qualifier.eq_ignore_ascii_case(preferred))
        .or_else(|| timings.first())
}

/// Fill in whichever side of the leg the provider left out.
///
/// When both sides are known they are used verbatim and `duration` (if any)
/// is taken as given; a missing duration is derived from the two instants.
pub fn reconcile(
    departure: Endpoint,
    arrival: Endpoint,
    duration: Option<Duration>,
) -> Result<ReconciledTimes, IncompleteLegData> {
    match (departure.known, arrival.known) {
        (Some(dep), Some(arr)) => Ok(ReconciledTimes {
            departure: dep.naive_local(),
            arrival: arr.naive_local(),
            duration: duration.unwrap_or_else(|| arr.signed_duration_since(dep)),
        }),
        (Some(dep), None) => {
            let duration = duration.ok_or(IncompleteLegData::NoDuration)?;
            let timezone = arrival.timezone.ok_or(IncompleteLegData::NoTimezone)?;
            let arr = dep
                .checked_add_signed(duration)
                .ok_or(IncompleteLegData::OutOfRange {
                    minutes: duration.num_minutes(),
                })?
                .with_timezone(&timezone);
            Ok(ReconciledTimes {
                departure: dep.naive_local(),
                arrival: arr.naive_local(),
                duration,
            })
        }
        (None, Some(arr)) => {
            let duration = duration.ok_or(IncompleteLegData::NoDuration)?;
            let timezone = departure.timezone.ok_or(IncompleteLegData::NoTimezone)?;
            let dep = arr
                .checked_sub_signed(duration)
                .ok_or(IncompleteLegData::OutOfRange {
                    minutes: duration.num_minutes(),
                })?
                .with_timezone(&timezone);
            Ok(ReconciledTimes {
                departure: dep.naive_local(),
                arrival: arr.naive_local(),
                duration,
            })
        }
        (None, None) => Err(IncompleteLegData::NoTimestamps),
    }
}
