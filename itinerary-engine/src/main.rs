use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use itinerary_engine::config::{EngineConfig, FlightBackendKind};
use itinerary_engine::engine::ItineraryEngine;

/// Resolve flight numbers and train line sequences into itinerary legs.
///
/// Provider credentials and endpoints are read from the environment.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Flight schedule provider, overriding FLIGHT_BACKEND.
    #[arg(long, global = true)]
    backend: Option<FlightBackendKind>,

    /// Serve train data from a fixture directory, overriding TRAIN_FIXTURES.
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Airport, airline and aircraft reference file, overriding REFERENCE_DATA.
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve one flight leg.
    Flight {
        /// Departure date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Flight number, e.g. LH717
        #[arg(long)]
        number: String,
        /// Boarding airport of a multi-leg flight
        #[arg(long)]
        origin: Option<String>,
    },
    /// Find the train journey riding the given lines.
    Train {
        /// Origin station ID
        #[arg(long)]
        from: String,
        /// Destination station ID
        #[arg(long)]
        to: String,
        /// Travel date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Line names in riding order, e.g. --line "ICE 707" --line "S 4"
        #[arg(long = "line", required = true)]
        lines: Vec<String>,
    },
    /// Look up a station by name.
    Station { query: String },
    /// Fetch leg polylines for a journey refresh token.
    Polylines { refresh_token: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = EngineConfig::from_env()?;
    if let Some(backend) = cli.backend {
        config.flight_backend = backend;
    }
    if let Some(dir) = cli.fixtures {
        config.train_fixtures = Some(dir);
    }
    if let Some(path) = cli.reference {
        config.reference_data = path;
    }

    let engine = ItineraryEngine::from_config(&config)?;

    match cli.command {
        Command::Flight {
            date,
            number,
            origin,
        } => to_json(&engine.resolve_flight_leg(date, &number, origin.as_deref()).await?),
        Command::Train {
            from,
            to,
            date,
            lines,
        } => to_json(&engine.search_train_journey(&from, &to, date, &lines).await?),
        Command::Station { query } => to_json(&engine.find_station(&query).await?),
        Command::Polylines { refresh_token } => {
            to_json(&engine.fetch_polylines(&refresh_token).await?)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Box<dyn std::error::Error>> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });

    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init();
    if let Err(e) = result {
        eprintln!("failed to install tracing subscriber: {e}");
    }
}
