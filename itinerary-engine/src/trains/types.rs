//! DB Vendo (transport.rest) response DTOs.
//!
//! These follow the Friendly Public Transport Format as served by
//! db-vendo-client. Fields are optional wherever the API omits them for
//! walking legs or address locations.

use serde::Deserialize;

/// Response from `GET /journeys`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneysResponse {
    #[serde(default)]
    pub journeys: Vec<Journey>,

    /// Cursor for the next page of later journeys.
    pub later_ref: Option<String>,

    /// Cursor for the previous page of earlier journeys.
    pub earlier_ref: Option<String>,
}

/// Response from `GET /journeys/{refreshToken}`.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyResponse {
    pub journey: Journey,
}

/// One candidate journey from origin to destination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    #[serde(default)]
    pub legs: Vec<Leg>,

    /// Opaque handle for re-fetching this journey later.
    pub refresh_token: Option<String>,
}

/// One movement of a journey: a ride on a line, or a walk between stops.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub origin: StationOrStop,
    pub destination: StationOrStop,

    /// Timetabled departure, ISO 8601 with offset.
    pub planned_departure: Option<String>,
    pub planned_arrival: Option<String>,

    /// Realtime departure when known.
    pub departure: Option<String>,
    pub arrival: Option<String>,

    /// Absent for walking legs.
    pub line: Option<Line>,

    pub walking: Option<bool>,

    /// Only present when requested with `polylines=true`.
    pub polyline: Option<FeatureCollection>,
}

/// A station, stop, or address location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationOrStop {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<LocationDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDto {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Line {
    /// Display name such as "ICE 707" or "S 1".
    pub name: Option<String>,
    pub operator: Option<Operator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Operator {
    pub name: Option<String>,
}

/// GeoJSON feature collection of the points a leg passes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
}

/// Point geometry; coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}
