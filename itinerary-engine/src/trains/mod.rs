//! Train journey search against DB Vendo.
//!
//! A traveller names the lines they ride ("ICE 707", then "S 1") between two
//! stations on a date. The provider only answers "which journeys go from A
//! to B", so the searcher pages through its results until a journey's
//! sequence of lines matches.
//!
//! Key characteristics of the provider:
//! - Journeys come in pages linked by an opaque `laterRef` cursor
//! - Walks and transfers appear as legs without a line
//! - Timestamps carry a UTC offset; resolved legs keep local wall-clock time
//! - A journey's `refreshToken` re-fetches it later, e.g. for polylines

mod client;
mod convert;
mod error;
mod fixture;
mod matcher;
mod search;
mod types;

pub use client::{JourneyCursor, JourneyQuery, VendoClient, VendoConfig};
pub use convert::ConversionError;
pub use error::SearchError;
pub use fixture::FixtureJourneyClient;
pub use matcher::{JourneyMatch, Rejection, match_journey};
pub use search::{
    JourneySearchConfig, TrainJourneySearcher, TrainScheduleBackend, TrainScheduleProvider,
};
pub use types::{Journey, JourneyResponse, JourneysResponse, Leg, StationOrStop};
