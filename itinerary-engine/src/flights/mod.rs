//! Flight leg resolution.
//!
//! Turns a flight number and departure date, optionally with the airport the
//! traveller boards at, into one fully populated
//! [`FlightLeg`](crate::domain::FlightLeg):
//!
//! 1. The schedule backend is asked for every dated flight under that number.
//! 2. Exactly one dated flight with at most two legs is accepted.
//! 3. Through-flights need an origin to pick the leg.
//! 4. Airports, timezones and names come from the reference data, and a
//!    missing departure or arrival time is rebuilt from the leg duration.

mod aerodatabox;
mod amadeus;
mod error;
mod reconcile;
mod resolver;
mod schedule;

pub use aerodatabox::{AerodataboxClient, AerodataboxConfig, FlightContract};
pub use amadeus::{AmadeusClient, AmadeusConfig, ScheduleResponse};
pub use error::ResolveError;
pub use reconcile::{Endpoint, IncompleteLegData, ReconciledTimes, reconcile, select_timing};
pub use resolver::FlightLegResolver;
pub use schedule::{
    DatedFlight, FlightPoint, FlightScheduleBackend, FlightScheduleProvider, InlineAirport,
    SCHEDULED_ARRIVAL, SCHEDULED_DEPARTURE, ScheduledLeg, Timing,
};
