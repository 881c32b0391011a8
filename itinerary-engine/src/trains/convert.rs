//! Conversion from DB Vendo DTOs to domain types.

use crate::domain::{
    DomainError, Location, TrainDetail, TrainLeg, TrainStation, parse_offset_timestamp,
};

use super::types::{FeatureCollection, Journey, Leg, StationOrStop};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Legs do not form a valid journey
    #[error("invalid journey: {0}")]
    InvalidJourney(#[from] DomainError),
}

/// Build a [`TrainDetail`] from the chosen legs of a journey.
pub fn convert_journey(journey: &Journey, legs: &[&Leg]) -> Result<TrainDetail, ConversionError> {
    let refresh_token = journey
        .refresh_token
        .clone()
        .ok_or(ConversionError::MissingField("refreshToken"))?;

    let legs = legs
        .iter()
        .map(|leg| convert_leg(leg))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TrainDetail::new(refresh_token, legs)?)
}

/// Convert one leg, using timetabled times and falling back to realtime.
///
/// Local times keep the provider's wall-clock reading with the offset
/// dropped; the duration is computed from the offset-aware instants.
pub fn convert_leg(leg: &Leg) -> Result<TrainLeg, ConversionError> {
    let departure = leg
        .planned_departure
        .as_deref()
        .or(leg.departure.as_deref())
        .ok_or(ConversionError::MissingField("plannedDeparture"))?;
    let arrival = leg
        .planned_arrival
        .as_deref()
        .or(leg.arrival.as_deref())
        .ok_or(ConversionError::MissingField("plannedArrival"))?;

    let departure = parse_offset_timestamp(departure)
        .map_err(|_| ConversionError::InvalidTime(departure.to_string()))?;
    let arrival = parse_offset_timestamp(arrival)
        .map_err(|_| ConversionError::InvalidTime(arrival.to_string()))?;

    let line = leg.line.as_ref();

    Ok(TrainLeg {
        origin: convert_station(&leg.origin)?,
        destination: convert_station(&leg.destination)?,
        departure_date_time: departure.naive_local(),
        arrival_date_time: arrival.naive_local(),
        duration_in_minutes: arrival.signed_duration_since(departure).num_minutes(),
        line_name: line.and_then(|l| l.name.clone()),
        operator: line
            .and_then(|l| l.operator.as_ref())
            .and_then(|o| o.name.clone()),
    })
}

/// Convert a station. Address locations without an ID are keyed by name.
pub fn convert_station(station: &StationOrStop) -> Result<TrainStation, ConversionError> {
    let name = station.name.clone();
    let id = station
        .id
        .clone()
        .or_else(|| name.clone())
        .ok_or(ConversionError::MissingField("station id"))?;

    let location = station
        .location
        .as_ref()
        .and_then(|l| Some(Location::new(l.latitude?, l.longitude?)));

    Ok(TrainStation {
        name: name.unwrap_or_else(|| id.clone()),
        id,
        location,
    })
}

/// The ordered points of a leg's polyline. Non-point features are skipped.
pub fn convert_polyline(polyline: &FeatureCollection) -> Vec<Location> {
    polyline
        .features
        .iter()
        .filter_map(|f| f.geometry.as_ref())
        .filter(|g| g.kind == "Point")
        .filter_map(|g| match g.coordinates.as_slice() {
            [longitude, latitude, ..] => Some(Location::new(*latitude, *longitude)),
            _ => None,
        })
        .collect()
}
