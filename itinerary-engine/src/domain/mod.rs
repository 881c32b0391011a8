//! Domain types for the itinerary resolution engine.
//!
//! This module contains the value types that resolved itineraries are made
//! of, plus the parsers for provider-supplied codes, durations and
//! timestamps. All types enforce their invariants at construction time, so
//! code that receives these types can trust their validity.

mod airport;
mod duration;
mod error;
mod flight;
mod flight_number;
mod line;
mod time;
mod train;

pub use airport::{Airport, IataCode, InvalidIataCode, Location};
pub use duration::{MalformedDuration, parse_iso8601_duration};
pub use error::DomainError;
pub use flight::FlightLeg;
pub use flight_number::{FlightNumber, InvalidFlightNumber};
pub use line::LineName;
pub use time::{TimestampError, parse_local_timestamp, parse_offset_timestamp, parse_timestamp_in};
pub use train::{TrainDetail, TrainLeg, TrainStation};
