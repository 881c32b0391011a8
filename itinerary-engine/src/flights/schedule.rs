//! Provider-neutral flight schedule model.
//!
//! Both schedule backends translate their wire format into [`DatedFlight`]
//! records so the resolver runs one algorithm regardless of where the data
//! came from. The shape follows the richer of the two providers: a dated
//! flight has flight points carrying qualified timings, and legs linking
//! consecutive points.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{FlightNumber, Location};
use crate::provider::ProviderError;

use super::aerodatabox::AerodataboxClient;
use super::amadeus::AmadeusClient;

/// Qualifier for a scheduled time of departure.
pub const SCHEDULED_DEPARTURE: &str = "STD";

/// Qualifier for a scheduled time of arrival.
pub const SCHEDULED_ARRIVAL: &str = "STA";

/// A qualified timestamp as reported by a provider, e.g. `STD` at
/// `2026-02-01T12:35+01:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    pub qualifier: String,
    pub value: String,
}

impl Timing {
    pub fn new(qualifier: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            qualifier: qualifier.into(),
            value: value.into(),
        }
    }
}

/// Airport details a provider sends alongside the code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineAirport {
    pub name: Option<String>,
    pub municipality: Option<String>,
    pub location: Option<Location>,
}

/// An airport the flight touches, with its departure and arrival timings.
///
/// The first point of a flight only has departure timings, the last only
/// arrival timings, and intermediate points of a through-flight have both.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPoint {
    pub iata: String,
    pub departure: Vec<Timing>,
    pub arrival: Vec<Timing>,
    /// Used when the reference data does not know the airport.
    pub airport: Option<InlineAirport>,
}

impl FlightPoint {
    pub fn new(iata: impl Into<String>) -> Self {
        Self {
            iata: iata.into(),
            departure: Vec::new(),
            arrival: Vec::new(),
            airport: None,
        }
    }

    pub fn with_airport(mut self, airport: InlineAirport) -> Self {
        self.airport = Some(airport);
        self
    }

    pub fn with_departure(mut self, timing: Timing) -> Self {
        self.departure.push(timing);
        self
    }

    pub fn with_arrival(mut self, timing: Timing) -> Self {
        self.arrival.push(timing);
        self
    }
}

/// One operated segment between two flight points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledLeg {
    pub board_point: String,
    pub off_point: String,
    /// ISO-8601 duration, e.g. `PT7H25M`.
    pub scheduled_duration: Option<String>,
    /// IATA equipment code, resolved through the reference data.
    pub aircraft_code: Option<String>,
    /// Aircraft model name when the provider already supplies one.
    pub aircraft_name: Option<String>,
}

/// All legs operated under one flight number on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedFlight {
    pub carrier_code: String,
    /// Airline display name when the provider already supplies one.
    pub carrier_name: Option<String>,
    pub flight_number: u16,
    pub flight_points: Vec<FlightPoint>,
    pub legs: Vec<ScheduledLeg>,
}

impl DatedFlight {
    /// Find the flight point for an airport code.
    pub fn flight_point(&self, iata: &str) -> Option<&FlightPoint> {
        self.flight_points
            .iter()
            .find(|p| p.iata.eq_ignore_ascii_case(iata))
    }
}

/// Source of dated flight schedules.
///
/// Implementations own their authentication flow; callers only see
/// normalized [`DatedFlight`] records.
pub trait FlightScheduleProvider {
    /// Fetch every dated flight operated as `flight_number` departing on
    /// `date`. An empty vector means the provider knows no such flight.
    fn fetch_dated_flights(
        &self,
        flight_number: &FlightNumber,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DatedFlight>, ProviderError>> + Send;
}

/// Which schedule backend to use, chosen at deployment time.
#[derive(Debug, Clone)]
pub enum FlightScheduleBackend {
    Amadeus(AmadeusClient),
    Aerodatabox(AerodataboxClient),
}

impl FlightScheduleBackend {
    pub fn name(&self) -> &'static str {
        match self {
            FlightScheduleBackend::Amadeus(_) => "amadeus",
            FlightScheduleBackend::Aerodatabox(_) => "aerodatabox",
        }
    }
}

impl FlightScheduleProvider for FlightScheduleBackend {
    async fn fetch_dated_flights(
        &self,
        flight_number: &FlightNumber,
        date: NaiveDate,
    ) -> Result<Vec<DatedFlight>, ProviderError> {
        match self {
            FlightScheduleBackend::Amadeus(client) => {
                client.fetch_dated_flights(flight_number, date).await
            }
            FlightScheduleBackend::Aerodatabox(client) => {
                client.fetch_dated_flights(flight_number, date).await
            }
        }
    }
}
