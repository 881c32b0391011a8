//! Train search error types.

use chrono::NaiveDate;

use crate::provider::ProviderError;

use super::convert::ConversionError;

/// Errors from train journey search, station lookup and polyline retrieval.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request cannot be searched for
    #[error("invalid train search request: {0}")]
    InvalidRequest(String),

    /// No matching journey within the search budget
    #[error("no journey from {from} to {to} on {date} matching the requested lines after {rounds} searches")]
    JourneyNotFound {
        from: String,
        to: String,
        date: NaiveDate,
        rounds: usize,
    },

    /// Station lookup returned nothing
    #[error("no train station found for {0:?}")]
    StationNotFound(String),

    /// A matched journey could not be converted
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The train schedule provider call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Fixture data could not be loaded
    #[error("failed to load fixture {path}: {message}")]
    Fixture { path: String, message: String },
}
