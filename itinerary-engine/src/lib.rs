//! Itinerary resolution engine.
//!
//! Turns what a traveller knows about a trip into fully populated legs:
//! a flight number and date become a [`domain::FlightLeg`] with
//! timezone-correct times, and a pair of stations plus the train lines
//! ridden become a [`domain::TrainDetail`].

pub mod config;
pub mod domain;
pub mod engine;
pub mod flights;
pub mod provider;
pub mod reference;
pub mod trains;
