//! AeroDataBox API response DTOs.

use serde::Deserialize;

/// One operated leg from `GET /flights/number/{number}/{date}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightContract {
    /// Flight designator as displayed, e.g. "LH 717".
    pub number: String,
    pub departure: MovementContract,
    pub arrival: MovementContract,
    pub aircraft: Option<AircraftContract>,
    pub airline: Option<AirlineContract>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementContract {
    pub airport: AirportContract,
    pub scheduled_time: Option<DateTimeContract>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportContract {
    pub name: Option<String>,
    pub iata: Option<String>,
    pub municipality_name: Option<String>,
    pub location: Option<GeoCoordinates>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoCoordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A scheduled instant in both local and UTC renderings.
#[derive(Debug, Clone, Deserialize)]
pub struct DateTimeContract {
    /// e.g. `2026-02-01 12:35+01:00`
    pub local: String,
    /// e.g. `2026-02-01 11:35Z`
    pub utc: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AircraftContract {
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirlineContract {
    pub name: String,
}
