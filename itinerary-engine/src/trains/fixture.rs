//! Fixture-backed train schedule client for running without network access.
//!
//! Loads pre-recorded DB Vendo responses from a directory and serves them
//! as if they were live API responses:
//!
//! - `journeys/initial.json` answers the first search of any route
//! - `journeys/{cursor}.json` answers a follow-up search with `laterThan={cursor}`
//! - `locations.json` holds the stations served by station lookups
//! - `refreshed.json` maps refresh tokens to journeys with polylines
//!
//! Only `journeys/initial.json` is required.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::provider::ProviderError;

use super::client::{JourneyCursor, JourneyQuery};
use super::error::SearchError;
use super::search::TrainScheduleProvider;
use super::types::{JourneyResponse, JourneysResponse, StationOrStop};

/// Page key for the first search.
const INITIAL_PAGE: &str = "initial";

#[derive(Debug, Default)]
struct Fixtures {
    pages: HashMap<String, JourneysResponse>,
    locations: Vec<StationOrStop>,
    refreshed: HashMap<String, JourneyResponse>,
}

/// Train schedule client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct FixtureJourneyClient {
    fixtures: Arc<Fixtures>,
}

impl FixtureJourneyClient {
    /// Load fixtures from `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, SearchError> {
        let data_dir = data_dir.as_ref();
        let journeys_dir = data_dir.join("journeys");

        let entries = std::fs::read_dir(&journeys_dir).map_err(|e| fixture_error(&journeys_dir, e))?;

        let mut pages = HashMap::new();
        for entry in entries {
            let path = entry.map_err(|e| fixture_error(&journeys_dir, e))?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(key) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            pages.insert(key, load(&path)?);
        }

        if !pages.contains_key(INITIAL_PAGE) {
            return Err(SearchError::Fixture {
                path: journeys_dir.join("initial.json").display().to_string(),
                message: "initial page is missing".to_string(),
            });
        }

        let locations = load_optional(&data_dir.join("locations.json"))?.unwrap_or_default();
        let refreshed = load_optional(&data_dir.join("refreshed.json"))?.unwrap_or_default();

        Ok(Self {
            fixtures: Arc::new(Fixtures {
                pages,
                locations,
                refreshed,
            }),
        })
    }

    /// Number of journey pages loaded.
    pub fn page_count(&self) -> usize {
        self.fixtures.pages.len()
    }
}

impl TrainScheduleProvider for FixtureJourneyClient {
    /// Serves pages by cursor; the route in the query is not checked.
    async fn journeys(&self, query: &JourneyQuery) -> Result<JourneysResponse, ProviderError> {
        let key = match &query.cursor {
            JourneyCursor::Departure(_) => INITIAL_PAGE,
            JourneyCursor::LaterThan(cursor) => cursor.as_str(),
        };

        self.fixtures
            .pages
            .get(key)
            .cloned()
            .ok_or_else(|| ProviderError::Api {
                endpoint: format!("fixture journeys/{key}.json"),
                status: 404,
                message: "no such fixture page".to_string(),
            })
    }

    async fn locations(&self, query: &str) -> Result<Vec<StationOrStop>, ProviderError> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .fixtures
            .locations
            .iter()
            .filter(|s| {
                s.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn refresh_journey(&self, refresh_token: &str) -> Result<JourneyResponse, ProviderError> {
        self.fixtures
            .refreshed
            .get(refresh_token)
            .cloned()
            .ok_or_else(|| ProviderError::Api {
                endpoint: "fixture refreshed.json".to_string(),
                status: 404,
                message: format!("unknown refresh token {refresh_token:?}"),
            })
    }
}

fn fixture_error(path: &Path, e: impl std::fmt::Display) -> SearchError {
    SearchError::Fixture {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, SearchError> {
    let json = std::fs::read_to_string(path).map_err(|e| fixture_error(path, e))?;
    serde_json::from_str(&json).map_err(|e| fixture_error(path, e))
}

fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SearchError> {
    if path.exists() {
        load(path).map(Some)
    } else {
        Ok(None)
    }
}
