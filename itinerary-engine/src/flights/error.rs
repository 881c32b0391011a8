//! Flight resolution error types.

use chrono::NaiveDate;

use crate::domain::{
    IataCode, InvalidFlightNumber, InvalidIataCode, MalformedDuration, TimestampError,
};
use crate::provider::ProviderError;
use crate::reference::ReferenceError;

use super::reconcile::IncompleteLegData;

/// Errors from resolving a flight number into a [`FlightLeg`](crate::domain::FlightLeg).
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The requested flight number could not be parsed
    #[error(transparent)]
    InvalidFlightNumber(#[from] InvalidFlightNumber),

    /// The requested origin is not an IATA airport code
    #[error("invalid origin: {0}")]
    InvalidOrigin(#[from] InvalidIataCode),

    /// No dated flight, more than one, or a flight with too many legs
    #[error("flight {flight} on {date} not found or too complex ({dated_flights} dated flights, {legs} legs)")]
    NotFoundOrTooComplex {
        flight: String,
        date: NaiveDate,
        dated_flights: usize,
        legs: usize,
    },

    /// Several legs share the flight number and no origin was given
    #[error("flight {flight} operates several legs; specify an origin (one of {})", format_candidates(.candidates))]
    AmbiguousFlightRequest {
        flight: String,
        candidates: Vec<String>,
    },

    /// The schedule lacks the timestamps needed to place the leg
    #[error("incomplete data for flight {flight}: {source}")]
    IncompleteLegData {
        flight: String,
        #[source]
        source: IncompleteLegData,
    },

    /// The scheduled leg duration is not a valid ISO-8601 duration
    #[error(transparent)]
    MalformedDuration(#[from] MalformedDuration),

    /// A provider timestamp could not be parsed
    #[error(transparent)]
    InvalidTimestamp(#[from] TimestampError),

    /// An airport the flight touches is missing from the reference data
    #[error("airport {0} not found in reference data")]
    AirportNotFound(IataCode),

    /// A provider or reference field was missing or unusable
    #[error("unusable {field} in schedule data: {message}")]
    ProviderData {
        field: &'static str,
        message: String,
    },

    /// The schedule provider call failed
    #[error("schedule lookup for {flight} on {date} failed: {source}")]
    Provider {
        flight: String,
        date: NaiveDate,
        #[source]
        source: ProviderError,
    },
}

impl ResolveError {
    /// Whether the caller can fix the request by adding an origin.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveError::AmbiguousFlightRequest { .. })
    }
}

impl From<ReferenceError> for ResolveError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::AirportNotFound(code) => ResolveError::AirportNotFound(code),
            ReferenceError::AirlineNotFound(_) => ResolveError::ProviderData {
                field: "carrier code",
                message: err.to_string(),
            },
            ReferenceError::AircraftNotFound(_) => ResolveError::ProviderData {
                field: "aircraft code",
                message: err.to_string(),
            },
            other => ResolveError::ProviderData {
                field: "reference data",
                message: other.to_string(),
            },
        }
    }
}

fn format_candidates(candidates: &[String]) -> String {
    candidates.join(", ")
}
