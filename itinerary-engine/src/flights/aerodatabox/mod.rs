//! AeroDataBox schedule backend (via RapidAPI).
//!
//! Simpler than Amadeus: one record per operated leg, authenticated with a
//! static API key header, airline and aircraft names inline.

mod client;
mod convert;
mod types;

pub use client::{AerodataboxClient, AerodataboxConfig};
pub use types::FlightContract;
