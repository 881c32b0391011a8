//! Amadeus flight schedule client.
//!
//! Authenticates with the OAuth2 client-credentials flow and queries the
//! "On-Demand Flight Status" schedule endpoint.

use chrono::NaiveDate;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::domain::FlightNumber;
use crate::flights::schedule::{DatedFlight, FlightScheduleProvider};
use crate::provider::{ProviderError, build_http_client, fetch_json};

use super::convert::convert_schedule;
use super::types::{AccessTokenResponse, ScheduleResponse};

/// Default base URL for the Amadeus self-service API.
const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

/// Configuration for the Amadeus client.
#[derive(Clone)]
pub struct AmadeusConfig {
    /// API key (OAuth2 client id)
    pub api_key: String,
    /// API secret (OAuth2 client secret)
    pub api_secret: String,
    /// Base URL for the API (defaults to the test environment)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AmadeusConfig {
    /// Create a new config with the given credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL.
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

impl std::fmt::Debug for AmadeusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmadeusConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Amadeus schedule API client.
///
/// A fresh access token is requested for every schedule query; tokens are
/// not cached between calls.
#[derive(Clone)]
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl std::fmt::Debug for AmadeusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmadeusClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AmadeusClient {
    pub fn new(config: AmadeusConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(ProviderError::Config(
                "Amadeus API key and secret are required".to_string(),
            ));
        }

        let http = build_http_client(config.timeout_secs, HeaderMap::new())?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            api_secret: config.api_secret,
        })
    }

    /// Exchange the client credentials for a bearer token.
    async fn access_token(&self) -> Result<String, ProviderError> {
        let url = format!("{}/v1/security/oauth2/token", self.base_url);

        let request = self.http.post(&url).form(&[
            ("grant_type", "client_credentials"),
            ("client_id", self.api_key.as_str()),
            ("client_secret", self.api_secret.as_str()),
        ]);

        let token: AccessTokenResponse = fetch_json(request).await?;
        debug!(expires_in = ?token.expires_in, "obtained Amadeus access token");

        Ok(token.access_token)
    }

    /// Query all dated flights for a flight number on a date.
    pub async fn fetch_schedule(
        &self,
        flight_number: &FlightNumber,
        date: NaiveDate,
    ) -> Result<ScheduleResponse, ProviderError> {
        let token = self.access_token().await?;

        let url = format!("{}/v2/schedule/flights", self.base_url);
        let number = flight_number.number().to_string();
        let date = date.format("%Y-%m-%d").to_string();

        let request = self.http.get(&url).bearer_auth(token).query(&[
            ("carrierCode", flight_number.carrier()),
            ("flightNumber", number.as_str()),
            ("scheduledDepartureDate", date.as_str()),
        ]);

        fetch_json(request).await
    }
}

impl FlightScheduleProvider for AmadeusClient {
    async fn fetch_dated_flights(
        &self,
        flight_number: &FlightNumber,
        date: NaiveDate,
    ) -> Result<Vec<DatedFlight>, ProviderError> {
        let response = self.fetch_schedule(flight_number, date).await?;
        Ok(convert_schedule(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = AmadeusConfig::new("key", "secret")
            .with_base_url("https://api.amadeus.com")
            .with_timeout(10);

        assert_eq!(config.base_url, "https://api.amadeus.com");
        assert_eq!(config.timeout_secs, 10);
        assert!(!format!("{config:?}").contains("\"secret\""));
    }

    #[test]
    fn missing_credentials_rejected() {
        let err = AmadeusClient::new(AmadeusConfig::new("", "secret")).unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }

    #[test]
    fn trailing_slash_trimmed() {
        let client =
            AmadeusClient::new(AmadeusConfig::new("key", "secret").with_base_url("http://localhost/"))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost");
    }
}
