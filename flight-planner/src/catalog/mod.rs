//! Flight catalog: the immutable, time-windowed flight list.
//!
//! The search engine never parses raw schedule data; it requires a
//! well-formed list of flights. This module owns that list and the JSON
//! loader that produces it. Flights outside the search window are dropped
//! at load time, malformed records abort the load with a [`CatalogError`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{NaiveDateTime, ParseError};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Airport, Flight, FlightId, InvalidAirport};

/// Timestamp format of catalog records: `2025-09-01 09:00:00`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error loading or validating catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Could not read the catalog file
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// A record carries an invalid airport code
    #[error("record {record}: {source}")]
    BadAirport {
        record: usize,
        source: InvalidAirport,
    },

    /// A record carries an unparseable timestamp
    #[error("record {record}: invalid timestamp: {source}")]
    BadTimestamp { record: usize, source: ParseError },

    /// A record arrives before it departs
    #[error("record {record}: flight {number} arrives before it departs")]
    ArrivalBeforeDeparture { record: usize, number: u32 },
}

/// One raw catalog record as stored on disk.
#[derive(Debug, Deserialize)]
struct Record {
    origin: String,
    destination: String,
    number: u32,
    departure: String,
    arrival: String,
}

impl Record {
    fn into_flight(self, record: usize) -> Result<Flight, CatalogError> {
        let origin: Airport = self
            .origin
            .parse()
            .map_err(|source| CatalogError::BadAirport { record, source })?;
        let destination: Airport = self
            .destination
            .parse()
            .map_err(|source| CatalogError::BadAirport { record, source })?;
        let departure = parse_timestamp(&self.departure, record)?;
        let arrival = parse_timestamp(&self.arrival, record)?;

        if arrival < departure {
            return Err(CatalogError::ArrivalBeforeDeparture {
                record,
                number: self.number,
            });
        }

        Ok(Flight::new(origin, destination, self.number, departure, arrival))
    }
}

fn parse_timestamp(s: &str, record: usize) -> Result<NaiveDateTime, CatalogError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|source| CatalogError::BadTimestamp { record, source })
}

/// Load flights from a JSON file (an array of flight records).
///
/// No windowing is applied here; pass the result to
/// [`Catalog::within_window`] with the configured search window.
pub fn load_json(path: &Path) -> Result<Vec<Flight>, CatalogError> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_flight(i))
        .collect()
}

/// The immutable flight list, shared read-only by all search workers.
#[derive(Debug)]
pub struct Catalog {
    flights: Vec<Flight>,
}

impl Catalog {
    /// Build a catalog from an already-windowed flight list.
    pub fn new(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    /// Build a catalog, dropping flights outside `[window_start, window_end]`.
    ///
    /// A flight is in the window iff it departs at or after `window_start`
    /// and arrives at or before `window_end`.
    pub fn within_window(
        flights: Vec<Flight>,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Self {
        let total = flights.len();
        let flights: Vec<Flight> = flights
            .into_iter()
            .filter(|f| f.departure >= window_start && f.arrival <= window_end)
            .collect();
        debug!(
            kept = flights.len(),
            dropped = total - flights.len(),
            "windowed catalog"
        );
        Self { flights }
    }

    /// Number of flights in the catalog.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Returns true if the catalog holds no flights.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Look up a flight by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this catalog.
    pub fn flight(&self, id: FlightId) -> &Flight {
        &self.flights[id.index()]
    }

    /// Iterate over all flights with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (FlightId, &Flight)> {
        self.flights
            .iter()
            .enumerate()
            .map(|(i, f)| (FlightId(i as u32), f))
    }
}
