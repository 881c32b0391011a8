//! Environment-driven engine configuration.
//!
//! | Variable                   | Default                               |
//! |----------------------------|---------------------------------------|
//! | `FLIGHT_BACKEND`           | `amadeus` (or `aerodatabox`)          |
//! | `AMADEUS_URL`              | `https://test.api.amadeus.com`        |
//! | `AMADEUS_API_KEY`          | required for the Amadeus backend      |
//! | `AMADEUS_API_SECRET`       | required for the Amadeus backend      |
//! | `AEDBX_URL`                | `https://aerodatabox.p.rapidapi.com`  |
//! | `AEDBX_APIKEY`             | required for the AeroDataBox backend  |
//! | `DBVENDO_URL`              | `https://v6.db.transport.rest`        |
//! | `TRAIN_FIXTURES`           | unset; a directory serves recorded pages |
//! | `REFERENCE_DATA`           | `data/reference.json`                 |
//! | `TRAIN_SEARCH_MAX_RETRIES` | `10`                                  |
//! | `TRAIN_SEARCH_RESULTS`     | `10`                                  |
//! | `TRAIN_ACCEPT_UNLINED`     | `true`                                |
//! | `PROVIDER_TIMEOUT_SECS`    | `30`                                  |
//! | `REQUEST_DEADLINE_SECS`    | `120`                                 |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::flights::{AerodataboxConfig, AmadeusConfig};
use crate::trains::{JourneySearchConfig, VendoConfig};

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Which flight schedule provider to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightBackendKind {
    #[default]
    Amadeus,
    Aerodatabox,
}

impl FromStr for FlightBackendKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amadeus" => Ok(FlightBackendKind::Amadeus),
            "aerodatabox" | "aedbx" => Ok(FlightBackendKind::Aerodatabox),
            _ => Err("expected \"amadeus\" or \"aerodatabox\""),
        }
    }
}

impl fmt::Display for FlightBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightBackendKind::Amadeus => f.write_str("amadeus"),
            FlightBackendKind::Aerodatabox => f.write_str("aerodatabox"),
        }
    }
}

/// Everything needed to build an [`ItineraryEngine`](crate::engine::ItineraryEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub flight_backend: FlightBackendKind,
    pub amadeus: AmadeusConfig,
    pub aerodatabox: AerodataboxConfig,
    pub vendo: VendoConfig,
    /// Serve train data from this fixture directory instead of DB Vendo.
    pub train_fixtures: Option<PathBuf>,
    pub reference_data: PathBuf,
    pub search: JourneySearchConfig,
    /// Upper bound on one engine operation, all provider calls included.
    pub request_deadline: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            flight_backend: FlightBackendKind::default(),
            amadeus: AmadeusConfig::new("", ""),
            aerodatabox: AerodataboxConfig::new(""),
            vendo: VendoConfig::new(),
            train_fixtures: None,
            reference_data: PathBuf::from("data/reference.json"),
            search: JourneySearchConfig::default(),
            request_deadline: Duration::from_secs(120),
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get("FLIGHT_BACKEND") {
            config.flight_backend =
                value
                    .parse()
                    .map_err(|reason| ConfigError::Invalid {
                        key: "FLIGHT_BACKEND",
                        value,
                        reason,
                    })?;
        }

        let timeout: u64 = parse_or("PROVIDER_TIMEOUT_SECS", get("PROVIDER_TIMEOUT_SECS"), 30)?;
        if timeout == 0 {
            return Err(ConfigError::Invalid {
                key: "PROVIDER_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }

        config.amadeus = AmadeusConfig::new(
            get("AMADEUS_API_KEY").unwrap_or_default(),
            get("AMADEUS_API_SECRET").unwrap_or_default(),
        )
        .with_timeout(timeout);
        if let Some(url) = get("AMADEUS_URL") {
            config.amadeus = config.amadeus.with_base_url(url);
        }

        config.aerodatabox =
            AerodataboxConfig::new(get("AEDBX_APIKEY").unwrap_or_default()).with_timeout(timeout);
        if let Some(url) = get("AEDBX_URL") {
            config.aerodatabox = config.aerodatabox.with_base_url(url);
        }

        config.vendo = VendoConfig::new().with_timeout(timeout);
        if let Some(url) = get("DBVENDO_URL") {
            config.vendo = config.vendo.with_base_url(url);
        }

        config.train_fixtures = get("TRAIN_FIXTURES").map(PathBuf::from);

        if let Some(path) = get("REFERENCE_DATA") {
            config.reference_data = PathBuf::from(path);
        }

        let max_retries = parse_or("TRAIN_SEARCH_MAX_RETRIES", get("TRAIN_SEARCH_MAX_RETRIES"), 10)?;
        if max_retries == 0 {
            return Err(ConfigError::Invalid {
                key: "TRAIN_SEARCH_MAX_RETRIES",
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }

        let results_per_page = parse_or("TRAIN_SEARCH_RESULTS", get("TRAIN_SEARCH_RESULTS"), 10)?;
        if results_per_page == 0 {
            return Err(ConfigError::Invalid {
                key: "TRAIN_SEARCH_RESULTS",
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }

        config.search = JourneySearchConfig::default()
            .with_max_retries(max_retries)
            .with_results_per_page(results_per_page)
            .with_accept_unlined_journeys(parse_bool(
                "TRAIN_ACCEPT_UNLINED",
                get("TRAIN_ACCEPT_UNLINED"),
                true,
            )?);

        config.request_deadline = Duration::from_secs(parse_or(
            "REQUEST_DEADLINE_SECS",
            get("REQUEST_DEADLINE_SECS"),
            120,
        )?);

        Ok(config)
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            reason: "expected a non-negative integer",
        }),
    }
}

fn parse_bool(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value,
            reason: "expected true or false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.flight_backend, FlightBackendKind::Amadeus);
        assert_eq!(config.search.max_retries, 10);
        assert_eq!(config.search.results_per_page, 10);
        assert!(config.search.accept_unlined_journeys);
        assert_eq!(config.amadeus.timeout_secs, 30);
        assert_eq!(config.reference_data, PathBuf::from("data/reference.json"));
        assert_eq!(config.train_fixtures, None);
    }

    #[test]
    fn reads_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("FLIGHT_BACKEND", "AeroDataBox"),
            ("AEDBX_APIKEY", "rapid-key"),
            ("AEDBX_URL", "http://localhost:8080"),
            ("DBVENDO_URL", "http://localhost:3000"),
            ("TRAIN_SEARCH_MAX_RETRIES", "4"),
            ("TRAIN_SEARCH_RESULTS", "25"),
            ("TRAIN_ACCEPT_UNLINED", "false"),
            ("PROVIDER_TIMEOUT_SECS", "5"),
            ("REQUEST_DEADLINE_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.flight_backend, FlightBackendKind::Aerodatabox);
        assert_eq!(config.aerodatabox.api_key, "rapid-key");
        assert_eq!(config.aerodatabox.base_url, "http://localhost:8080");
        assert_eq!(config.aerodatabox.timeout_secs, 5);
        assert_eq!(config.vendo.base_url, "http://localhost:3000");
        assert_eq!(config.search.max_retries, 4);
        assert_eq!(config.search.results_per_page, 25);
        assert!(!config.search.accept_unlined_journeys);
        assert_eq!(config.request_deadline, Duration::from_secs(15));
    }

    #[test]
    fn empty_values_are_unset() {
        let config = EngineConfig::from_lookup(lookup(&[("FLIGHT_BACKEND", "  ")])).unwrap();
        assert_eq!(config.flight_backend, FlightBackendKind::Amadeus);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = EngineConfig::from_lookup(lookup(&[("FLIGHT_BACKEND", "sabre")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "FLIGHT_BACKEND", .. }));

        let err = EngineConfig::from_lookup(lookup(&[("TRAIN_SEARCH_MAX_RETRIES", "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TRAIN_SEARCH_MAX_RETRIES", .. }));

        let err = EngineConfig::from_lookup(lookup(&[("TRAIN_SEARCH_MAX_RETRIES", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TRAIN_SEARCH_MAX_RETRIES", .. }));

        let err = EngineConfig::from_lookup(lookup(&[("TRAIN_SEARCH_RESULTS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TRAIN_SEARCH_RESULTS", .. }));

        let err = EngineConfig::from_lookup(lookup(&[("TRAIN_ACCEPT_UNLINED", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TRAIN_ACCEPT_UNLINED", .. }));
    }
}
