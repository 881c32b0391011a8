//! Airport, airline and aircraft reference data.
//!
//! The flight resolver needs display names and, crucially, the IANA
//! timezone of every airport it touches. That knowledge is injected through
//! the [`IataLookup`] capability so it can be backed by a static table, a
//! cached API, or test fixtures.

mod error;
mod table;

use std::sync::Arc;

use chrono_tz::Tz;

use crate::domain::{Airport, IataCode};

pub use error::ReferenceError;
pub use table::ReferenceTable;

/// An airport together with the timezone used to reconcile its timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRecord {
    pub airport: Airport,
    pub timezone: Tz,
}

/// Read-through lookup of reference data keyed by IATA codes.
///
/// Implementations must be idempotent: looking up the same code twice
/// yields the same answer.
pub trait IataLookup {
    /// Look up an airport by its IATA code.
    fn lookup_airport(&self, iata: IataCode) -> Result<AirportRecord, ReferenceError>;

    /// Look up an airline's display name by its two-character carrier code.
    fn lookup_airline_name(&self, carrier_code: &str) -> Result<String, ReferenceError>;

    /// Look up an aircraft model name by its IATA equipment code (e.g. "74H").
    fn lookup_aircraft_name(&self, aircraft_code: &str) -> Result<String, ReferenceError>;
}

impl<T: IataLookup + ?Sized> IataLookup for Arc<T> {
    fn lookup_airport(&self, iata: IataCode) -> Result<AirportRecord, ReferenceError> {
        (**self).lookup_airport(iata)
    }

    fn lookup_airline_name(&self, carrier_code: &str) -> Result<String, ReferenceError> {
        (**self).lookup_airline_name(carrier_code)
    }

    fn lookup_aircraft_name(&self, aircraft_code: &str) -> Result<String, ReferenceError> {
        (**self).lookup_aircraft_name(aircraft_code)
    }
}
