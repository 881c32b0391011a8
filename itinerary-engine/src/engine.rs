//! The itinerary engine: the two resolution operations behind one facade.
//!
//! Every operation is a sequential chain of provider requests bounded by a
//! deadline. Dropping the returned future cancels the request in flight;
//! an elapsed deadline surfaces as [`EngineError::Cancelled`] and is never
//! retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::{ConfigError, EngineConfig, FlightBackendKind};
use crate::domain::{FlightLeg, Location, TrainDetail, TrainStation};
use crate::flights::{
    AerodataboxClient, AmadeusClient, FlightLegResolver, FlightScheduleBackend,
    FlightScheduleProvider, ResolveError,
};
use crate::provider::ProviderError;
use crate::reference::{IataLookup, ReferenceError, ReferenceTable};
use crate::trains::{
    FixtureJourneyClient, SearchError, TrainJourneySearcher, TrainScheduleBackend,
    TrainScheduleProvider, VendoClient,
};

/// Errors from engine construction and operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Flight(#[from] ResolveError),

    #[error(transparent)]
    Train(#[from] SearchError),

    /// The operation did not finish before its deadline
    #[error("{operation} cancelled after {after:?}")]
    Cancelled {
        operation: &'static str,
        after: Duration,
    },
}

/// Resolves flight legs and train journeys.
#[derive(Debug, Clone)]
pub struct ItineraryEngine<F = FlightScheduleBackend, T = TrainScheduleBackend, R = Arc<ReferenceTable>> {
    flights: FlightLegResolver<F, R>,
    trains: TrainJourneySearcher<T>,
    deadline: Duration,
}

impl ItineraryEngine {
    /// Build the engine with the backends named in `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let reference = ReferenceTable::from_path(&config.reference_data)?;
        info!(
            airports = reference.airport_count(),
            path = %config.reference_data.display(),
            "loaded reference data"
        );

        let flights = match config.flight_backend {
            FlightBackendKind::Amadeus => {
                FlightScheduleBackend::Amadeus(AmadeusClient::new(config.amadeus.clone())?)
            }
            FlightBackendKind::Aerodatabox => FlightScheduleBackend::Aerodatabox(
                AerodataboxClient::new(config.aerodatabox.clone())?,
            ),
        };

        let trains = match &config.train_fixtures {
            Some(dir) => {
                warn!(dir = %dir.display(), "serving train journeys from fixtures");
                TrainScheduleBackend::Fixture(FixtureJourneyClient::new(dir)?)
            }
            None => TrainScheduleBackend::Vendo(VendoClient::new(config.vendo.clone())?),
        };

        info!(flight_backend = flights.name(), "itinerary engine ready");

        Ok(Self::new(
            FlightLegResolver::new(flights, Arc::new(reference)),
            TrainJourneySearcher::new(trains, config.search.clone()),
            config.request_deadline,
        ))
    }
}

impl<F, T, R> ItineraryEngine<F, T, R>
where
    F: FlightScheduleProvider + Sync,
    T: TrainScheduleProvider + Sync,
    R: IataLookup + Sync,
{
    pub fn new(
        flights: FlightLegResolver<F, R>,
        trains: TrainJourneySearcher<T>,
        deadline: Duration,
    ) -> Self {
        Self {
            flights,
            trains,
            deadline,
        }
    }

    /// Resolve a flight number on a date, optionally from a given origin,
    /// into one fully populated leg.
    pub async fn resolve_flight_leg(
        &self,
        date: NaiveDate,
        flight_number: &str,
        origin: Option<&str>,
    ) -> Result<FlightLeg, EngineError> {
        self.with_deadline(
            "flight resolution",
            self.flights.resolve(date, flight_number, origin),
        )
        .await
    }

    /// Find the journey between two stations on a date that rides exactly
    /// the given lines, in order.
    pub async fn search_train_journey(
        &self,
        from_station_id: &str,
        to_station_id: &str,
        date: NaiveDate,
        expected_lines: &[String],
    ) -> Result<TrainDetail, EngineError> {
        self.with_deadline(
            "train journey search",
            self.trains
                .search(from_station_id, to_station_id, date, expected_lines),
        )
        .await
    }

    /// Resolve a station name to the provider's best match.
    pub async fn find_station(&self, query: &str) -> Result<TrainStation, EngineError> {
        self.with_deadline("station lookup", self.trains.find_station(query))
            .await
    }

    /// The route points of each leg of a previously found journey.
    pub async fn fetch_polylines(
        &self,
        refresh_token: &str,
    ) -> Result<Vec<Vec<Location>>, EngineError> {
        self.with_deadline("polyline retrieval", self.trains.fetch_polylines(refresh_token))
            .await
    }

    async fn with_deadline<V, E>(
        &self,
        operation: &'static str,
        future: impl Future<Output = Result<V, E>>,
    ) -> Result<V, EngineError>
    where
        EngineError: From<E>,
    {
        match tokio::time::timeout(self.deadline, future).await {
            Ok(result) => Ok(result?),
            Err(_elapsed) => Err(EngineError::Cancelled {
                operation,
                after: self.deadline,
            }),
        }
    }
}
