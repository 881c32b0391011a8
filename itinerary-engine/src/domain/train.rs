//! Resolved train journey.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::{DomainError, Location};

/// A station as identified by the train schedule provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainStation {
    /// Opaque provider station ID (e.g. an EVA number).
    pub id: String,
    pub name: String,
    pub location: Option<Location>,
}

/// One train movement between two stations.
///
/// A leg without a line name is a connector (walk or transfer) segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainLeg {
    pub origin: TrainStation,
    pub destination: TrainStation,
    pub departure_date_time: NaiveDateTime,
    pub arrival_date_time: NaiveDateTime,
    pub duration_in_minutes: i64,
    pub line_name: Option<String>,
    pub operator: Option<String>,
}

impl TrainLeg {
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_in_minutes)
    }
}

/// An ordered train journey plus the provider handle to re-fetch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainDetail {
    pub refresh_token: String,
    legs: Vec<TrainLeg>,
}

impl TrainDetail {
    /// Create a journey, validating that legs are non-empty and in departure order.
    pub fn new(refresh_token: String, legs: Vec<TrainLeg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney);
        }

        if legs.iter().any(|leg| leg.duration_in_minutes < 0) {
            return Err(DomainError::InvalidLeg("arrival must not precede departure"));
        }

        if legs
            .windows(2)
            .any(|pair| pair[1].departure_date_time < pair[0].departure_date_time)
        {
            return Err(DomainError::InvalidLeg("legs must be in departure order"));
        }

        Ok(Self {
            refresh_token,
            legs,
        })
    }

    pub fn legs(&self) -> &[TrainLeg] {
        &self.legs
    }

    /// Local departure time of the first leg.
    pub fn departure(&self) -> NaiveDateTime {
        self.legs[0].departure_date_time
    }

    /// Local arrival time of the last leg.
    pub fn arrival(&self) -> NaiveDateTime {
        self.legs[self.legs.len() - 1].arrival_date_time
    }
}
