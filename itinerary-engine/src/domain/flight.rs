//! Resolved flight leg.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::{Airport, FlightNumber};

/// One operated flight segment, fully resolved.
///
/// Departure and arrival are local wall-clock times at the respective
/// airports; the two may be in different timezones, so
/// `arrival - departure` is generally *not* the flight duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightLeg {
    pub origin: Airport,
    pub destination: Airport,
    pub airline: String,
    pub flight_number: FlightNumber,
    pub departure_date_time: NaiveDateTime,
    pub arrival_date_time: NaiveDateTime,
    pub duration_in_minutes: i64,
    pub aircraft: Option<String>,
}

impl FlightLeg {
    /// Scheduled block time.
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_in_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IataCode, Location};
    use chrono::NaiveDate;

    fn airport(code: &str, name: &str, municipality: &str) -> Airport {
        Airport {
            iata: IataCode::parse(code).unwrap(),
            name: name.to_string(),
            municipality: municipality.to_string(),
            location: Location::new(50.0, 8.5),
        }
    }

    #[test]
    fn serializes_like_the_rest_api() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let leg = FlightLeg {
            origin: airport("FRA", "Frankfurt am Main Airport", "Frankfurt am Main"),
            destination: airport("JFK", "New York John F Kennedy Intl", "New York"),
            airline: "Lufthansa".to_string(),
            flight_number: FlightNumber::parse("LH400").unwrap(),
            departure_date_time: date.and_hms_opt(10, 0, 0).unwrap(),
            arrival_date_time: date.and_hms_opt(12, 50, 0).unwrap(),
            duration_in_minutes: 530,
            aircraft: Some("Boeing 747-8".to_string()),
        };

        let json = serde_json::to_value(&leg).unwrap();
        assert_eq!(json["flightNumber"], "LH 400");
        assert_eq!(json["origin"]["iata"], "FRA");
        assert_eq!(json["departureDateTime"], "2026-02-01T10:00:00");
        assert_eq!(json["durationInMinutes"], 530);
        assert_eq!(leg.duration(), Duration::minutes(530));
    }
}
