//! DB Vendo HTTP client.
//!
//! Talks to a db-vendo-client REST deployment (the transport.rest API
//! shape). No authentication is needed.

use chrono::NaiveDate;
use reqwest::Url;
use reqwest::header::HeaderMap;

use crate::provider::{ProviderError, build_http_client, fetch_json};

use super::search::TrainScheduleProvider;
use super::types::{JourneyResponse, JourneysResponse, StationOrStop};

/// Default base URL for the public DB transport.rest deployment.
const DEFAULT_BASE_URL: &str = "https://v6.db.transport.rest";

/// Where in the result stream a journey search starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyCursor {
    /// First page: journeys departing from the start of this date.
    Departure(NaiveDate),
    /// Follow-up page: journeys after a previous page's `laterRef`.
    LaterThan(String),
}

/// One `GET /journeys` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyQuery {
    pub from: String,
    pub to: String,
    pub transfers: usize,
    pub results: usize,
    pub cursor: JourneyCursor,
}

impl JourneyQuery {
    /// Query parameters in the order the API documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from", self.from.clone()),
            ("to", self.to.clone()),
            ("transfers", self.transfers.to_string()),
            ("results", self.results.to_string()),
        ];
        match &self.cursor {
            JourneyCursor::Departure(date) => {
                params.push(("departure", date.format("%Y-%m-%d").to_string()))
            }
            JourneyCursor::LaterThan(cursor) => params.push(("laterThan", cursor.clone())),
        }
        params
    }
}

/// Configuration for the DB Vendo client.
#[derive(Debug, Clone)]
pub struct VendoConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl VendoConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for self-hosted deployments).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for VendoConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// DB Vendo API client.
#[derive(Debug, Clone)]
pub struct VendoClient {
    http: reqwest::Client,
    base_url: Url,
}

impl VendoClient {
    pub fn new(config: VendoConfig) -> Result<Self, ProviderError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ProviderError::Config(format!("invalid DB Vendo URL: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(ProviderError::Config(format!(
                "DB Vendo URL cannot be a base: {base_url}"
            )));
        }

        Ok(Self {
            http: build_http_client(config.timeout_secs, HeaderMap::new())?,
            base_url,
        })
    }

    /// Build `{base}/{segments...}`, escaping each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Config(format!("cannot extend URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl TrainScheduleProvider for VendoClient {
    /// `GET /journeys`
    async fn journeys(&self, query: &JourneyQuery) -> Result<JourneysResponse, ProviderError> {
        let url = self.url(&["journeys"])?;
        fetch_json(self.http.get(url).query(&query.params())).await
    }

    /// `GET /locations`, stations and stops only.
    async fn locations(&self, query: &str) -> Result<Vec<StationOrStop>, ProviderError> {
        let url = self.url(&["locations"])?;
        fetch_json(
            self.http
                .get(url)
                .query(&[("query", query), ("poi", "false")]),
        )
        .await
    }

    /// `GET /journeys/{refreshToken}` with polylines.
    async fn refresh_journey(&self, refresh_token: &str) -> Result<JourneyResponse, ProviderError> {
        let url = self.url(&["journeys", refresh_token])?;
        fetch_json(self.http.get(url).query(&[("polylines", "true")])).await
    }
}
