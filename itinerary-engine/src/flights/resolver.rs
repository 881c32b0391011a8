//! Flight number + date → one fully resolved [`FlightLeg`].

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::domain::{
    Airport, FlightLeg, FlightNumber, IataCode, parse_iso8601_duration, parse_offset_timestamp,
    parse_timestamp_in,
};
use crate::reference::{IataLookup, ReferenceError};

use super::error::ResolveError;
use super::reconcile::{Endpoint, reconcile, select_timing};
use super::schedule::{
    DatedFlight, FlightScheduleProvider, InlineAirport, SCHEDULED_ARRIVAL, SCHEDULED_DEPARTURE,
    ScheduledLeg,
};

/// Through-flights with more legs than this are not resolved.
const MAX_LEGS: usize = 2;

/// Resolves a user's flight request against a schedule provider.
///
/// Generic over the schedule backend and the reference data so both can be
/// swapped for in-memory fakes.
#[derive(Debug, Clone)]
pub struct FlightLegResolver<P, R> {
    provider: P,
    reference: R,
}

impl<P, R> FlightLegResolver<P, R>
where
    P: FlightScheduleProvider + Sync,
    R: IataLookup + Sync,
{
    pub fn new(provider: P, reference: R) -> Self {
        Self {
            provider,
            reference,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve `flight_number` departing on `date`.
    ///
    /// `origin` picks one leg of a multi-leg through-flight. Without it a
    /// through-flight is reported as [`ResolveError::AmbiguousFlightRequest`].
    pub async fn resolve(
        &self,
        date: NaiveDate,
        flight_number: &str,
        origin: Option<&str>,
    ) -> Result<FlightLeg, ResolveError> {
        let flight_number = FlightNumber::parse(flight_number)?;
        let origin = origin.map(IataCode::parse_lenient).transpose()?;

        debug!(flight = %flight_number, %date, origin = ?origin, "resolving flight leg");

        let dated_flights = self
            .provider
            .fetch_dated_flights(&flight_number, date)
            .await
            .map_err(|source| ResolveError::Provider {
                flight: flight_number.to_string(),
                date,
                source,
            })?;

        let flight = single_dated_flight(dated_flights, &flight_number, date)?;
        let leg = select_leg(&flight, &flight_number, origin)?;

        self.assemble(&flight, leg)
    }

    fn assemble(&self, flight: &DatedFlight, leg: &ScheduledLeg) -> Result<FlightLeg, ResolveError> {
        let flight_number = FlightNumber::from_parts(&flight.carrier_code, flight.flight_number)
            .map_err(|e| ResolveError::ProviderData {
                field: "flight designator",
                message: e.to_string(),
            })?;

        let board = flight.flight_point(&leg.board_point);
        let off = flight.flight_point(&leg.off_point);

        let origin = self.airport(&leg.board_point, board.and_then(|p| p.airport.as_ref()))?;
        let destination = self.airport(&leg.off_point, off.and_then(|p| p.airport.as_ref()))?;

        let departure = board
            .and_then(|p| select_timing(&p.departure, SCHEDULED_DEPARTURE))
            .map(|t| parse_in(&t.value, origin.timezone))
            .transpose()?;

        let arrival = off
            .and_then(|p| select_timing(&p.arrival, SCHEDULED_ARRIVAL))
            .map(|t| parse_in(&t.value, destination.timezone))
            .transpose()?;

        let duration = leg
            .scheduled_duration
            .as_deref()
            .map(parse_iso8601_duration)
            .transpose()?;

        let times = reconcile(
            Endpoint {
                known: departure,
                timezone: origin.timezone,
            },
            Endpoint {
                known: arrival,
                timezone: destination.timezone,
            },
            duration,
        )
        .map_err(|source| ResolveError::IncompleteLegData {
            flight: flight_number.to_string(),
            source,
        })?;

        let airline = match &flight.carrier_name {
            Some(name) => name.clone(),
            None => self.reference.lookup_airline_name(&flight.carrier_code)?,
        };

        let aircraft = match (&leg.aircraft_name, &leg.aircraft_code) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(code)) => Some(self.reference.lookup_aircraft_name(code)?),
            (None, None) => None,
        };

        Ok(FlightLeg {
            origin: origin.airport,
            destination: destination.airport,
            airline,
            flight_number,
            departure_date_time: times.departure,
            arrival_date_time: times.arrival,
            duration_in_minutes: times.duration.num_minutes(),
            aircraft,
        })
    }

    /// Reference data first; the provider's inline details otherwise.
    fn airport(
        &self,
        code: &str,
        inline: Option<&InlineAirport>,
    ) -> Result<ResolvedAirport, ResolveError> {
        let iata = IataCode::parse_lenient(code).map_err(|e| ResolveError::ProviderData {
            field: "airport code",
            message: e.to_string(),
        })?;

        match self.reference.lookup_airport(iata) {
            Ok(record) => Ok(ResolvedAirport {
                airport: record.airport,
                timezone: Some(record.timezone),
            }),
            Err(ReferenceError::AirportNotFound(_)) => {
                let airport = inline
                    .and_then(|inline| inline_airport(iata, inline))
                    .ok_or(ResolveError::AirportNotFound(iata))?;
                debug!(%iata, "airport not in reference data, using provider details");
                Ok(ResolvedAirport {
                    airport,
                    timezone: None,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// An airport plus its timezone when the reference data knows it.
struct ResolvedAirport {
    airport: Airport,
    timezone: Option<Tz>,
}

/// Build an airport from provider details; needs a name and coordinates.
fn inline_airport(iata: IataCode, inline: &InlineAirport) -> Option<Airport> {
    let name = inline.name.as_deref()?.trim();
    if name.is_empty() {
        return None;
    }
    Some(Airport {
        iata,
        name: name.to_string(),
        municipality: inline.municipality.clone().unwrap_or_default(),
        location: inline.location?,
    })
}

/// Without a known timezone only timestamps with an explicit offset parse.
fn parse_in(value: &str, timezone: Option<Tz>) -> Result<DateTime<FixedOffset>, ResolveError> {
    Ok(match timezone {
        Some(tz) => parse_timestamp_in(value, tz)?,
        None => parse_offset_timestamp(value)?,
    })
}

/// Exactly one dated flight with at most [`MAX_LEGS`] legs is resolvable.
fn single_dated_flight(
    mut dated_flights: Vec<DatedFlight>,
    flight_number: &FlightNumber,
    date: NaiveDate,
) -> Result<DatedFlight, ResolveError> {
    let legs = dated_flights.first().map_or(0, |f| f.legs.len());

    if dated_flights.len() != 1 || legs == 0 || legs > MAX_LEGS {
        return Err(ResolveError::NotFoundOrTooComplex {
            flight: flight_number.to_string(),
            date,
            dated_flights: dated_flights.len(),
            legs,
        });
    }

    Ok(dated_flights.swap_remove(0))
}

/// Pick the leg the traveller boards.
fn select_leg<'a>(
    flight: &'a DatedFlight,
    flight_number: &FlightNumber,
    origin: Option<IataCode>,
) -> Result<&'a ScheduledLeg, ResolveError> {
    let first = flight
        .legs
        .first()
        .ok_or_else(|| ResolveError::ProviderData {
            field: "legs",
            message: "dated flight has no legs".to_string(),
        })?;

    let Some(origin) = origin else {
        let mut candidates: Vec<String> = Vec::new();
        for leg in &flight.legs {
            let board = leg.board_point.trim().to_ascii_uppercase();
            if !candidates.contains(&board) {
                candidates.push(board);
            }
        }

        if candidates.len() > 1 {
            return Err(ResolveError::AmbiguousFlightRequest {
                flight: flight_number.to_string(),
                candidates,
            });
        }
        return Ok(first);
    };

    match flight
        .legs
        .iter()
        .find(|leg| leg.board_point.trim().eq_ignore_ascii_case(origin.as_str()))
    {
        Some(leg) => Ok(leg),
        None => {
            warn!(
                flight = %flight_number,
                origin = %origin,
                fallback = %first.board_point,
                "no leg departs from requested origin, using first leg"
            );
            Ok(first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Airport, Location};
    use crate::flights::reconcile::IncompleteLegData;
    use crate::flights::schedule::{FlightPoint, Timing};
    use crate::provider::ProviderError;
    use crate::reference::{AirportRecord, ReferenceTable};
    use chrono::{Duration, NaiveDateTime};
    use chrono_tz::Tz;
    use std::sync::Mutex;

    /// Schedule provider serving canned dated flights.
    struct MockSchedule {
        flights: Vec<DatedFlight>,
        requests: Mutex<Vec<(String, NaiveDate)>>,
    }

    impl MockSchedule {
        fn new(flights: Vec<DatedFlight>) -> Self {
            Self {
                flights,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, NaiveDate)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl FlightScheduleProvider for MockSchedule {
        async fn fetch_dated_flights(
            &self,
            flight_number: &FlightNumber,
            date: NaiveDate,
        ) -> Result<Vec<DatedFlight>, ProviderError> {
            self.requests
                .lock()
                .unwrap()
                .push((flight_number.to_string(), date));
            Ok(self.flights.clone())
        }
    }

    /// Schedule provider that always fails.
    struct FailingSchedule;

    impl FlightScheduleProvider for FailingSchedule {
        async fn fetch_dated_flights(
            &self,
            _flight_number: &FlightNumber,
            _date: NaiveDate,
        ) -> Result<Vec<DatedFlight>, ProviderError> {
            Err(ProviderError::Api {
                endpoint: "GET https://schedule.test/v2/schedule/flights".to_string(),
                status: 500,
                message: "internal error".to_string(),
            })
        }
    }

    fn record(code: &str, name: &str, municipality: &str, tz: Tz) -> AirportRecord {
        AirportRecord {
            airport: Airport {
                iata: IataCode::parse(code).unwrap(),
                name: name.to_string(),
                municipality: municipality.to_string(),
                location: Location::new(0.0, 0.0),
            },
            timezone: tz,
        }
    }

    fn reference() -> ReferenceTable {
        ReferenceTable::default()
            .with_airport(record("FRA", "Frankfurt Airport", "Frankfurt", chrono_tz::Europe::Berlin))
            .with_airport(record(
                "JFK",
                "New York John F. Kennedy International Airport",
                "New York",
                chrono_tz::America::New_York,
            ))
            .with_airport(record("DXB", "Dubai International Airport", "Dubai", chrono_tz::Asia::Dubai))
            .with_airport(record("SYD", "Sydney Kingsford Smith Airport", "Sydney", chrono_tz::Australia::Sydney))
            .with_airport(record(
                "CHC",
                "Christchurch International Airport",
                "Christchurch",
                chrono_tz::Pacific::Auckland,
            ))
            .with_airline("LH", "Lufthansa")
            .with_airline("EK", "Emirates")
            .with_aircraft("74H", "Boeing 747-8")
            .with_aircraft("388", "Airbus A380-800")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn leg(board: &str, off: &str, duration: &str, aircraft: &str) -> ScheduledLeg {
        ScheduledLeg {
            board_point: board.to_string(),
            off_point: off.to_string(),
            scheduled_duration: Some(duration.to_string()),
            aircraft_code: Some(aircraft.to_string()),
            aircraft_name: None,
        }
    }

    fn lh717() -> DatedFlight {
        DatedFlight {
            carrier_code: "LH".to_string(),
            carrier_name: None,
            flight_number: 717,
            flight_points: vec![
                FlightPoint::new("FRA").with_departure(Timing::new("STD", "2026-02-01T12:35+01:00")),
                FlightPoint::new("JFK").with_arrival(Timing::new("STA", "2026-02-01T15:15-05:00")),
            ],
            legs: vec![leg("FRA", "JFK", "PT8H40M", "74H")],
        }
    }

    fn ek412() -> DatedFlight {
        DatedFlight {
            carrier_code: "EK".to_string(),
            carrier_name: None,
            flight_number: 412,
            flight_points: vec![
                FlightPoint::new("DXB").with_departure(Timing::new("STD", "2026-02-01T10:15+04:00")),
                FlightPoint::new("SYD")
                    .with_arrival(Timing::new("STA", "2026-02-02T07:15+11:00"))
                    .with_departure(Timing::new("STD", "2026-02-02T09:15+11:00")),
                FlightPoint::new("CHC").with_arrival(Timing::new("STA", "2026-02-02T14:25+13:00")),
            ],
            legs: vec![
                leg("DXB", "SYD", "PT14H", "388"),
                leg("SYD", "CHC", "PT3H10M", "388"),
            ],
        }
    }

    #[tokio::test]
    async fn single_leg_flight_resolves_without_origin() {
        let provider = MockSchedule::new(vec![lh717()]);
        let resolver = FlightLegResolver::new(provider, reference());

        let leg = resolver.resolve(date(), "LH717", None).await.unwrap();

        assert_eq!(leg.airline, "Lufthansa");
        assert_eq!(leg.flight_number.to_string(), "LH 717");
        assert_eq!(leg.departure_date_time, dt("2026-02-01T12:35:00"));
        assert_eq!(leg.arrival_date_time, dt("2026-02-01T15:15:00"));
        assert_eq!(leg.duration_in_minutes, 8 * 60 + 40);
        assert_eq!(leg.origin.iata.as_str(), "FRA");
        assert_eq!(leg.destination.iata.as_str(), "JFK");
        assert_eq!(leg.aircraft.as_deref(), Some("Boeing 747-8"));

        assert_eq!(
            resolver.provider().requests(),
            vec![("LH 717".to_string(), date())]
        );
    }

    #[tokio::test]
    async fn matching_origin_gives_consistent_leg() {
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![lh717()]), reference());

        let leg = resolver.resolve(date(), "lh 717", Some("fra")).await.unwrap();

        let departure = leg
            .departure_date_time
            .and_local_timezone(chrono_tz::Europe::Berlin)
            .unwrap();
        let arrival = leg
            .arrival_date_time
            .and_local_timezone(chrono_tz::America::New_York)
            .unwrap();
        assert_eq!(departure + leg.duration(), arrival);
        assert_eq!(leg.duration(), Duration::minutes(520));
    }

    #[tokio::test]
    async fn through_flight_without_origin_is_ambiguous() {
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![ek412()]), reference());

        let err = resolver.resolve(date(), "EK412", None).await.unwrap_err();

        match err {
            ResolveError::AmbiguousFlightRequest { flight, candidates } => {
                assert_eq!(flight, "EK 412");
                assert_eq!(candidates, vec!["DXB".to_string(), "SYD".to_string()]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn through_flight_legs_resolve_by_origin() {
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![ek412()]), reference());

        let first = resolver.resolve(date(), "EK412", Some("DXB")).await.unwrap();
        assert_eq!(first.origin.iata.as_str(), "DXB");
        assert_eq!(first.destination.iata.as_str(), "SYD");
        assert_eq!(first.departure_date_time, dt("2026-02-01T10:15:00"));
        assert_eq!(first.arrival_date_time, dt("2026-02-02T07:15:00"));
        assert_eq!(first.aircraft.as_deref(), Some("Airbus A380-800"));

        let second = resolver.resolve(date(), "EK412", Some("SYD")).await.unwrap();
        assert_eq!(second.origin.iata.as_str(), "SYD");
        assert_eq!(second.destination.iata.as_str(), "CHC");
        assert_eq!(second.departure_date_time, dt("2026-02-02T09:15:00"));
        assert_eq!(second.duration_in_minutes, 190);
        assert_eq!(second.airline, "Emirates");
    }

    #[tokio::test]
    async fn unknown_origin_falls_back_to_first_leg() {
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![ek412()]), reference());

        let leg = resolver.resolve(date(), "EK412", Some("CHC")).await.unwrap();
        assert_eq!(leg.origin.iata.as_str(), "DXB");
    }

    #[tokio::test]
    async fn missing_arrival_is_reconstructed() {
        let mut flight = ek412();
        flight.flight_points[1].arrival.clear();
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let leg = resolver.resolve(date(), "EK412", Some("DXB")).await.unwrap();

        assert_eq!(leg.arrival_date_time, dt("2026-02-02T07:15:00"));
    }

    #[tokio::test]
    async fn missing_departure_is_reconstructed() {
        let mut flight = ek412();
        flight.flight_points[1].departure.clear();
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let leg = resolver.resolve(date(), "EK412", Some("SYD")).await.unwrap();

        // 14:25+13:00 minus 3h10 is 11:15+13:00, 09:15 in Sydney.
        assert_eq!(leg.departure_date_time, dt("2026-02-02T09:15:00"));
    }

    #[tokio::test]
    async fn no_timings_is_incomplete() {
        let mut flight = lh717();
        for point in &mut flight.flight_points {
            point.departure.clear();
            point.arrival.clear();
        }
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let err = resolver.resolve(date(), "LH717", None).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::IncompleteLegData {
                source: IncompleteLegData::NoTimestamps,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn zero_or_many_dated_flights_not_found() {
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![]), reference());
        let err = resolver.resolve(date(), "LH717", None).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotFoundOrTooComplex { dated_flights: 0, .. }
        ));

        let resolver = FlightLegResolver::new(MockSchedule::new(vec![lh717(), lh717()]), reference());
        let err = resolver.resolve(date(), "LH717", None).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotFoundOrTooComplex { dated_flights: 2, .. }
        ));
    }

    #[tokio::test]
    async fn three_legs_is_too_complex() {
        let mut flight = ek412();
        flight.legs.push(leg("CHC", "AKL", "PT1H20M", "388"));
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let err = resolver.resolve(date(), "EK412", Some("DXB")).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFoundOrTooComplex { legs: 3, .. }));
    }

    #[tokio::test]
    async fn unknown_airport_is_a_data_error() {
        let mut flight = lh717();
        flight.legs[0].off_point = "HND".to_string();
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let err = resolver.resolve(date(), "LH717", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::AirportNotFound(code) if code.as_str() == "HND"));
    }

    fn lh716_to_haneda() -> DatedFlight {
        let haneda = InlineAirport {
            name: Some("Tokyo Haneda".to_string()),
            municipality: Some("Tokyo".to_string()),
            location: Some(Location::new(35.5523, 139.7798)),
        };
        DatedFlight {
            carrier_code: "LH".to_string(),
            carrier_name: Some("Lufthansa".to_string()),
            flight_number: 716,
            flight_points: vec![
                FlightPoint::new("FRA").with_departure(Timing::new("STD", "2026-02-01T11:45+01:00")),
                FlightPoint::new("HND")
                    .with_arrival(Timing::new("STA", "2026-02-02T07:55+09:00"))
                    .with_airport(haneda),
            ],
            legs: vec![leg("FRA", "HND", "PT12H10M", "74H")],
        }
    }

    #[tokio::test]
    async fn airport_outside_reference_uses_provider_details() {
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![lh716_to_haneda()]), reference());

        let leg = resolver.resolve(date(), "LH716", None).await.unwrap();

        assert_eq!(leg.destination.iata.as_str(), "HND");
        assert_eq!(leg.destination.name, "Tokyo Haneda");
        assert_eq!(leg.destination.municipality, "Tokyo");
        assert_eq!(leg.destination.location, Location::new(35.5523, 139.7798));
        assert_eq!(leg.arrival_date_time, dt("2026-02-02T07:55:00"));
        assert_eq!(leg.duration_in_minutes, 12 * 60 + 10);
    }

    #[tokio::test]
    async fn provider_airport_without_timezone_cannot_be_rebuilt() {
        let mut flight = lh716_to_haneda();
        flight.flight_points[1].arrival.clear();
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let err = resolver.resolve(date(), "LH716", None).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::IncompleteLegData {
                source: IncompleteLegData::NoTimezone,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn provider_airport_without_name_is_not_found() {
        let mut flight = lh716_to_haneda();
        flight.flight_points[1].airport = Some(InlineAirport::default());
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let err = resolver.resolve(date(), "LH716", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::AirportNotFound(code) if code.as_str() == "HND"));
    }

    #[tokio::test]
    async fn huge_duration_is_a_data_error() {
        let mut flight = lh717();
        flight.flight_points[1].arrival.clear();
        flight.legs[0].scheduled_duration = Some("P99999999W".to_string());
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let err = resolver.resolve(date(), "LH717", None).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::IncompleteLegData {
                source: IncompleteLegData::OutOfRange { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_duration_is_surfaced() {
        let mut flight = lh717();
        flight.legs[0].scheduled_duration = Some("8h40".to_string());
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let err = resolver.resolve(date(), "LH717", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::MalformedDuration(_)));
    }

    #[tokio::test]
    async fn inline_names_take_precedence() {
        let mut flight = lh717();
        flight.carrier_name = Some("Lufthansa German Airlines".to_string());
        flight.legs[0].aircraft_code = None;
        flight.legs[0].aircraft_name = Some("Boeing 747-8I".to_string());
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let leg = resolver.resolve(date(), "LH717", None).await.unwrap();
        assert_eq!(leg.airline, "Lufthansa German Airlines");
        assert_eq!(leg.aircraft.as_deref(), Some("Boeing 747-8I"));
    }

    #[tokio::test]
    async fn unknown_aircraft_code_is_not_defaulted() {
        let mut flight = lh717();
        flight.legs[0].aircraft_code = Some("ZZZ".to_string());
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![flight]), reference());

        let err = resolver.resolve(date(), "LH717", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::ProviderData { field: "aircraft code", .. }));
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_provider() {
        let resolver = FlightLegResolver::new(MockSchedule::new(vec![lh717()]), reference());

        let err = resolver.resolve(date(), "L", None).await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidFlightNumber(_)));

        let err = resolver.resolve(date(), "LH717", Some("FRANK")).await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidOrigin(_)));

        assert!(resolver.provider().requests().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_keeps_context() {
        let resolver = FlightLegResolver::new(FailingSchedule, reference());

        let err = resolver.resolve(date(), "LH717", None).await.unwrap_err();
        match err {
            ResolveError::Provider { flight, source, .. } => {
                assert_eq!(flight, "LH 717");
                assert!(matches!(source, ProviderError::Api { status: 500, .. }));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
