//! Conversion from Amadeus DTOs to the schedule model.

use crate::flights::schedule::{DatedFlight, FlightPoint, ScheduledLeg, Timing};

use super::types::{DatedFlightDto, FlightPointDto, LegDto, ScheduleResponse, TimingsDto};

pub fn convert_schedule(response: ScheduleResponse) -> Vec<DatedFlight> {
    response.data.into_iter().map(convert_dated_flight).collect()
}

fn convert_dated_flight(dto: DatedFlightDto) -> DatedFlight {
    DatedFlight {
        carrier_code: dto.flight_designator.carrier_code,
        carrier_name: None,
        flight_number: dto.flight_designator.flight_number,
        flight_points: dto.flight_points.into_iter().map(convert_flight_point).collect(),
        legs: dto.legs.into_iter().map(convert_leg).collect(),
    }
}

fn convert_flight_point(dto: FlightPointDto) -> FlightPoint {
    FlightPoint {
        iata: dto.iata_code,
        departure: convert_timings(dto.departure),
        arrival: convert_timings(dto.arrival),
        airport: None,
    }
}

fn convert_timings(dto: Option<TimingsDto>) -> Vec<Timing> {
    dto.map(|t| t.timings)
        .unwrap_or_default()
        .into_iter()
        .map(|t| Timing::new(t.qualifier, t.value))
        .collect()
}

fn convert_leg(dto: LegDto) -> ScheduledLeg {
    ScheduledLeg {
        board_point: dto.board_point_iata_code,
        off_point: dto.off_point_iata_code,
        scheduled_duration: dto.scheduled_leg_duration,
        aircraft_code: dto.aircraft_equipment.and_then(|e| e.aircraft_type),
        aircraft_name: None,
    }
}
