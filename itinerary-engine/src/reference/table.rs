//! In-memory reference table loaded from JSON.

use std::collections::HashMap;
use std::path::Path;

use chrono_tz::Tz;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{Airport, IataCode, Location};

use super::error::ReferenceError;
use super::{AirportRecord, IataLookup};

/// On-disk layout of the reference file.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceFile {
    #[serde(default)]
    pub airports: Vec<AirportDto>,
    #[serde(default)]
    pub airlines: Vec<CodeNameDto>,
    #[serde(default)]
    pub aircraft: Vec<CodeNameDto>,
}

/// One airport entry of the reference file.
#[derive(Debug, Clone, Deserialize)]
pub struct AirportDto {
    pub iata: String,
    pub name: String,
    pub municipality: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name, e.g. "Europe/Berlin".
    pub timezone: String,
}

/// A code → display name pair (airlines, aircraft types).
#[derive(Debug, Clone, Deserialize)]
pub struct CodeNameDto {
    pub code: String,
    pub name: String,
}

/// Static reference data, keyed by IATA code.
///
/// Entries with an invalid IATA code or an unknown timezone are skipped
/// with a warning when the table is built.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    airports: HashMap<IataCode, AirportRecord>,
    airlines: HashMap<String, String>,
    aircraft: HashMap<String, String>,
}

impl ReferenceTable {
    /// Load a reference table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ReferenceError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json(&json)
    }

    /// Parse a reference table from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let file: ReferenceFile = serde_json::from_str(json).map_err(|e| ReferenceError::Json {
            message: e.to_string(),
        })?;
        Ok(Self::from_file(file))
    }

    /// Build a table from already-deserialized entries.
    pub fn from_file(file: ReferenceFile) -> Self {
        Self {
            airports: build_airports(file.airports),
            airlines: build_names(file.airlines),
            aircraft: build_names(file.aircraft),
        }
    }

    /// Add or replace an airport.
    pub fn with_airport(mut self, record: AirportRecord) -> Self {
        self.airports.insert(record.airport.iata, record);
        self
    }

    /// Add or replace an airline name.
    pub fn with_airline(mut self, code: &str, name: &str) -> Self {
        self.airlines.insert(code.to_ascii_uppercase(), name.to_string());
        self
    }

    /// Add or replace an aircraft model name.
    pub fn with_aircraft(mut self, code: &str, name: &str) -> Self {
        self.aircraft.insert(code.to_ascii_uppercase(), name.to_string());
        self
    }

    /// Number of known airports.
    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }
}

impl IataLookup for ReferenceTable {
    fn lookup_airport(&self, iata: IataCode) -> Result<AirportRecord, ReferenceError> {
        self.airports
            .get(&iata)
            .cloned()
            .ok_or(ReferenceError::AirportNotFound(iata))
    }

    fn lookup_airline_name(&self, carrier_code: &str) -> Result<String, ReferenceError> {
        self.airlines
            .get(&carrier_code.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| ReferenceError::AirlineNotFound(carrier_code.to_string()))
    }

    fn lookup_aircraft_name(&self, aircraft_code: &str) -> Result<String, ReferenceError> {
        self.aircraft
            .get(&aircraft_code.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| ReferenceError::AircraftNotFound(aircraft_code.to_string()))
    }
}

fn build_airports(airports: Vec<AirportDto>) -> HashMap<IataCode, AirportRecord> {
    airports
        .into_iter()
        .filter_map(|dto| {
            let iata = match IataCode::parse_lenient(&dto.iata) {
                Ok(iata) => iata,
                Err(e) => {
                    warn!(error = %e, "skipping reference airport");
                    return None;
                }
            };
            let timezone: Tz = match dto.timezone.parse() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(%iata, timezone = %dto.timezone, "skipping airport with unknown timezone");
                    return None;
                }
            };
            let airport = Airport {
                iata,
                name: display_name(&dto.name, &dto.municipality),
                municipality: title_case_if_shouting(&dto.municipality),
                location: Location::new(dto.latitude, dto.longitude),
            };
            Some((iata, AirportRecord { airport, timezone }))
        })
        .collect()
}

fn build_names(entries: Vec<CodeNameDto>) -> HashMap<String, String> {
    entries
        .into_iter()
        .map(|e| (e.code.trim().to_ascii_uppercase(), e.name))
        .collect()
}

/// Airport display name: prefixed with the municipality unless it already
/// starts with it ("INTL" → "Frankfurt Intl").
fn display_name(name: &str, municipality: &str) -> String {
    let name = title_case_if_shouting(name);
    let municipality = title_case_if_shouting(municipality);
    if municipality.is_empty() || name.to_lowercase().starts_with(&municipality.to_lowercase()) {
        name
    } else {
        format!("{municipality} {name}")
    }
}

/// Providers often send names in all caps; turn those into title case and
/// leave mixed-case names alone.
fn title_case_if_shouting(s: &str) -> String {
    let s = s.trim();
    if s.chars().any(char::is_lowercase) {
        return s.to_string();
    }
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
