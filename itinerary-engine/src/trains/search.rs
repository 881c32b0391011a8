//! Paginated train journey search.
//!
//! The provider returns journeys a page at a time. The searcher walks the
//! pages with the `laterRef` cursor until a journey's lines match the
//! requested ones or the round budget runs out. Only data mismatches cause
//! another round; provider failures end the search immediately.

use std::future::Future;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::domain::{LineName, Location, TrainDetail, TrainStation};
use crate::provider::ProviderError;

use super::client::{JourneyCursor, JourneyQuery, VendoClient};
use super::convert::{convert_journey, convert_polyline, convert_station};
use super::error::SearchError;
use super::fixture::FixtureJourneyClient;
use super::matcher::match_journey;
use super::types::{Journey, JourneyResponse, JourneysResponse, StationOrStop};

/// Source of train journeys, stations and polylines.
pub trait TrainScheduleProvider {
    /// Fetch one page of journeys.
    fn journeys(
        &self,
        query: &JourneyQuery,
    ) -> impl Future<Output = Result<JourneysResponse, ProviderError>> + Send;

    /// Look up stations by free-text name.
    fn locations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<StationOrStop>, ProviderError>> + Send;

    /// Re-fetch a journey by refresh token, including leg polylines.
    fn refresh_journey(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<JourneyResponse, ProviderError>> + Send;
}

/// Which train schedule source to use.
#[derive(Debug, Clone)]
pub enum TrainScheduleBackend {
    Vendo(VendoClient),
    Fixture(FixtureJourneyClient),
}

impl TrainScheduleProvider for TrainScheduleBackend {
    async fn journeys(&self, query: &JourneyQuery) -> Result<JourneysResponse, ProviderError> {
        match self {
            TrainScheduleBackend::Vendo(client) => client.journeys(query).await,
            TrainScheduleBackend::Fixture(client) => client.journeys(query).await,
        }
    }

    async fn locations(&self, query: &str) -> Result<Vec<StationOrStop>, ProviderError> {
        match self {
            TrainScheduleBackend::Vendo(client) => client.locations(query).await,
            TrainScheduleBackend::Fixture(client) => client.locations(query).await,
        }
    }

    async fn refresh_journey(&self, refresh_token: &str) -> Result<JourneyResponse, ProviderError> {
        match self {
            TrainScheduleBackend::Vendo(client) => client.refresh_journey(refresh_token).await,
            TrainScheduleBackend::Fixture(client) => client.refresh_journey(refresh_token).await,
        }
    }
}

/// Configuration parameters for journey search.
#[derive(Debug, Clone)]
pub struct JourneySearchConfig {
    /// Maximum number of provider calls per search, the initial one included.
    pub max_retries: usize,

    /// Journeys requested per page.
    pub results_per_page: usize,

    /// Accept a journey that has no lined legs at all.
    pub accept_unlined_journeys: bool,
}

impl JourneySearchConfig {
    pub fn with_max_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    pub fn with_results_per_page(mut self, n: usize) -> Self {
        self.results_per_page = n;
        self
    }

    pub fn with_accept_unlined_journeys(mut self, accept: bool) -> Self {
        self.accept_unlined_journeys = accept;
        self
    }
}

impl Default for JourneySearchConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            results_per_page: 10,
            accept_unlined_journeys: true,
        }
    }
}

/// Finds the journey that uses a given sequence of train lines.
#[derive(Debug, Clone)]
pub struct TrainJourneySearcher<P> {
    provider: P,
    config: JourneySearchConfig,
}

impl<P: TrainScheduleProvider + Sync> TrainJourneySearcher<P> {
    pub fn new(provider: P, config: JourneySearchConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &JourneySearchConfig {
        &self.config
    }

    /// Search for a journey from `from` to `to` on `date` riding exactly
    /// `expected_lines`, in order.
    pub async fn search<S: AsRef<str>>(
        &self,
        from: &str,
        to: &str,
        date: NaiveDate,
        expected_lines: &[S],
    ) -> Result<TrainDetail, SearchError> {
        let expected: Vec<LineName> = expected_lines
            .iter()
            .map(|l| LineName::new(l.as_ref()))
            .collect();

        if expected.is_empty() {
            return Err(SearchError::InvalidRequest(
                "at least one line is required".to_string(),
            ));
        }
        if let Some(blank) = expected.iter().position(LineName::is_blank) {
            return Err(SearchError::InvalidRequest(format!(
                "line {} is blank",
                blank + 1
            )));
        }
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(SearchError::InvalidRequest(
                "origin and destination station IDs are required".to_string(),
            ));
        }

        let mut query = JourneyQuery {
            from: from.to_string(),
            to: to.to_string(),
            transfers: expected.len() - 1,
            results: self.config.results_per_page,
            cursor: JourneyCursor::Departure(date),
        };

        let not_found = |rounds| SearchError::JourneyNotFound {
            from: from.to_string(),
            to: to.to_string(),
            date,
            rounds,
        };

        for round in 1..=self.config.max_retries {
            debug!(round, from, to, cursor = ?query.cursor, "searching journeys");

            let page = self.provider.journeys(&query).await?;

            if let Some(detail) = self.first_match(&page.journeys, &expected)? {
                debug!(round, legs = detail.legs().len(), "found matching journey");
                return Ok(detail);
            }

            match page.later_ref {
                Some(cursor) => query.cursor = JourneyCursor::LaterThan(cursor),
                None => {
                    debug!(round, "provider returned no later page");
                    return Err(not_found(round));
                }
            }
        }

        Err(not_found(self.config.max_retries))
    }

    /// Convert the first journey on a page that passes the matcher.
    fn first_match(
        &self,
        journeys: &[Journey],
        expected: &[LineName],
    ) -> Result<Option<TrainDetail>, SearchError> {
        for (idx, journey) in journeys.iter().enumerate() {
            match match_journey(journey, expected, self.config.accept_unlined_journeys) {
                Ok(matched) => {
                    if matched.pass_through {
                        debug!(idx, "accepting journey without lined legs");
                    }
                    return Ok(Some(convert_journey(journey, &matched.legs)?));
                }
                Err(rejection) => trace!(idx, ?rejection, "journey rejected"),
            }
        }
        Ok(None)
    }

    /// Resolve a free-text station name to the provider's best match.
    pub async fn find_station(&self, query: &str) -> Result<TrainStation, SearchError> {
        let results = self.provider.locations(query).await?;
        let first = results
            .first()
            .ok_or_else(|| SearchError::StationNotFound(query.to_string()))?;
        Ok(convert_station(first)?)
    }

    /// The route of each leg of a journey, as ordered points.
    pub async fn fetch_polylines(&self, refresh_token: &str) -> Result<Vec<Vec<Location>>, SearchError> {
        let response = self.provider.refresh_journey(refresh_token).await?;
        Ok(response
            .journey
            .legs
            .iter()
            .map(|leg| leg.polyline.as_ref().map(convert_polyline).unwrap_or_default())
            .collect())
    }
}
