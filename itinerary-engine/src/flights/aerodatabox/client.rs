//! AeroDataBox flight schedule client.

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::domain::FlightNumber;
use crate::flights::schedule::{DatedFlight, FlightScheduleProvider};
use crate::provider::{ProviderError, build_http_client, fetch_optional_json};

use super::convert::convert_flights;
use super::types::FlightContract;

/// Default base URL for AeroDataBox on RapidAPI.
const DEFAULT_BASE_URL: &str = "https://aerodatabox.p.rapidapi.com";

/// RapidAPI routes requests by this host header.
const RAPIDAPI_HOST: &str = "aerodatabox.p.rapidapi.com";

/// Configuration for the AeroDataBox client.
#[derive(Clone)]
pub struct AerodataboxConfig {
    /// RapidAPI key
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AerodataboxConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
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

impl std::fmt::Debug for AerodataboxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AerodataboxConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// AeroDataBox API client.
#[derive(Debug, Clone)]
pub struct AerodataboxClient {
    http: reqwest::Client,
    base_url: String,
}

impl AerodataboxClient {
    pub fn new(config: AerodataboxConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::Config(
                "AeroDataBox API key is required".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ProviderError::Config("invalid AeroDataBox API key format".to_string()))?;
        api_key.set_sensitive(true);
        headers.insert("x-rapidapi-key", api_key);
        headers.insert("x-rapidapi-host", HeaderValue::from_static(RAPIDAPI_HOST));

        let http = build_http_client(config.timeout_secs, headers)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the raw leg records for a flight number departing on `date`.
    ///
    /// `204 No Content` means the flight is unknown and yields no records.
    pub async fn fetch_records(
        &self,
        flight_number: &FlightNumber,
        date: NaiveDate,
    ) -> Result<Vec<FlightContract>, ProviderError> {
        let url = format!(
            "{}/flights/number/{}{}/{}",
            self.base_url,
            flight_number.carrier(),
            flight_number.number(),
            date.format("%Y-%m-%d")
        );

        let request = self
            .http
            .get(&url)
            .query(&[("dateLocalRole", "Departure")]);

        Ok(fetch_optional_json(request).await?.unwrap_or_default())
    }
}

impl FlightScheduleProvider for AerodataboxClient {
    async fn fetch_dated_flights(
        &self,
        flight_number: &FlightNumber,
        date: NaiveDate,
    ) -> Result<Vec<DatedFlight>, ProviderError> {
        let records = self.fetch_records(flight_number, date).await?;
        Ok(convert_flights(flight_number, &records).into_iter().collect())
    }
}
