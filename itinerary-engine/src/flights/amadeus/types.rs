//! Amadeus API response DTOs.
//!
//! Only the fields the resolver reads are modelled; everything else in the
//! responses is ignored by serde.

use serde::Deserialize;

/// Response from `POST /v1/security/oauth2/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    /// Lifetime of the token in seconds.
    pub expires_in: Option<u64>,
}

/// Response from `GET /v2/schedule/flights`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub data: Vec<DatedFlightDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedFlightDto {
    pub flight_designator: FlightDesignator,
    #[serde(default)]
    pub flight_points: Vec<FlightPointDto>,
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDesignator {
    pub carrier_code: String,
    pub flight_number: u16,
    /// Operational suffix such as "A"; not part of the designator we expose.
    pub operational_suffix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPointDto {
    pub iata_code: String,
    pub departure: Option<TimingsDto>,
    pub arrival: Option<TimingsDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimingsDto {
    #[serde(default)]
    pub timings: Vec<TimingDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimingDto {
    pub qualifier: String,
    /// Local time with offset, e.g. `2026-02-01T12:35+01:00`.
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    pub board_point_iata_code: String,
    pub off_point_iata_code: String,
    pub aircraft_equipment: Option<AircraftEquipment>,
    /// ISO-8601 duration, e.g. `PT8H40M`.
    pub scheduled_leg_duration: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftEquipment {
    pub aircraft_type: Option<String>,
}
