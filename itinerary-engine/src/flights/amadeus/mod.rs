//! Amadeus schedule backend.
//!
//! The richer of the two flight providers: one dated flight per schedule
//! entry, with per-airport qualified timings and per-leg ISO-8601 durations
//! and equipment codes. Requests are authenticated with a short-lived
//! OAuth2 token obtained from the API key and secret.

mod client;
mod convert;
mod types;

pub use client::{AmadeusClient, AmadeusConfig};
pub use types::ScheduleResponse;
