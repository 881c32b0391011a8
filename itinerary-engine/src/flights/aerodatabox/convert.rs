//! Merging AeroDataBox leg records into one dated flight.

use tracing::warn;

use crate::domain::{FlightNumber, Location, parse_offset_timestamp};
use crate::flights::schedule::{
    DatedFlight, FlightPoint, InlineAirport, SCHEDULED_ARRIVAL, SCHEDULED_DEPARTURE,
    ScheduledLeg, Timing,
};

use super::types::{AirportContract, FlightContract, MovementContract};

/// Fold the per-leg records of one flight number into a [`DatedFlight`].
///
/// Records missing an airport code are skipped. Returns `None` when no
/// usable record remains.
pub fn convert_flights(
    flight_number: &FlightNumber,
    records: &[FlightContract],
) -> Option<DatedFlight> {
    let mut flight = DatedFlight {
        carrier_code: flight_number.carrier().to_string(),
        carrier_name: None,
        flight_number: flight_number.number(),
        flight_points: Vec::new(),
        legs: Vec::new(),
    };

    for record in records {
        let (Some(board), Some(off)) = (
            record.departure.airport.iata.as_deref(),
            record.arrival.airport.iata.as_deref(),
        ) else {
            warn!(number = %record.number, "skipping AeroDataBox record without airport codes");
            continue;
        };

        if flight.carrier_name.is_none() {
            flight.carrier_name = record.airline.as_ref().map(|a| a.name.clone());
        }

        let point = point_mut(&mut flight.flight_points, board, &record.departure.airport);
        if let Some(time) = &record.departure.scheduled_time {
            point
                .departure
                .push(Timing::new(SCHEDULED_DEPARTURE, time.local.clone()));
        }

        let point = point_mut(&mut flight.flight_points, off, &record.arrival.airport);
        if let Some(time) = &record.arrival.scheduled_time {
            point
                .arrival
                .push(Timing::new(SCHEDULED_ARRIVAL, time.local.clone()));
        }

        flight.legs.push(ScheduledLeg {
            board_point: board.to_string(),
            off_point: off.to_string(),
            scheduled_duration: utc_duration(&record.departure, &record.arrival),
            aircraft_code: None,
            aircraft_name: record.aircraft.as_ref().and_then(|a| a.model.clone()),
        });
    }

    if flight.legs.is_empty() {
        None
    } else {
        Some(flight)
    }
}

fn point_mut<'a>(
    points: &'a mut Vec<FlightPoint>,
    iata: &str,
    airport: &AirportContract,
) -> &'a mut FlightPoint {
    let idx = match points.iter().position(|p| p.iata == iata) {
        Some(idx) => idx,
        None => {
            points.push(FlightPoint::new(iata));
            points.len() - 1
        }
    };

    let point = &mut points[idx];
    if point.airport.is_none() {
        point.airport = Some(inline_airport(airport));
    }
    point
}

fn inline_airport(airport: &AirportContract) -> InlineAirport {
    InlineAirport {
        name: airport.name.clone(),
        municipality: airport.municipality_name.clone(),
        location: airport
            .location
            .as_ref()
            .map(|l| Location::new(l.lat, l.lon)),
    }
}

/// Block time from the UTC renderings, as an ISO-8601 duration.
fn utc_duration(departure: &MovementContract, arrival: &MovementContract) -> Option<String> {
    let dep = parse_offset_timestamp(&departure.scheduled_time.as_ref()?.utc).ok()?;
    let arr = parse_offset_timestamp(&arrival.scheduled_time.as_ref()?.utc).ok()?;
    let minutes = arr.signed_duration_since(dep).num_minutes();
    (minutes >= 0).then(|| format!("PT{minutes}M"))
}
