//! Adjacency index: which flights can follow which.
//!
//! Built once before any worker starts, then shared read-only. Grouping by
//! origin answers "what departs from here"; the per-flight successor lists
//! precompute the Transition Validator over the whole catalog so the inner
//! search loop is a slice walk.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{Airport, FlightId};

use super::config::SearchConfig;
use super::transition::valid_transition;

/// Immutable flight adjacency, shared by all search workers.
#[derive(Debug)]
pub struct AdjacencyIndex {
    /// Flights grouped by departure airport.
    by_origin: HashMap<Airport, Vec<FlightId>>,

    /// Legal successors per flight, indexed by `FlightId`, ordered by
    /// descending departure time. The order affects only discovery order
    /// of the exhaustive search, never completeness.
    successors: Vec<Vec<FlightId>>,
}

impl AdjacencyIndex {
    /// Build the index for a catalog under a configuration.
    pub fn build(catalog: &Catalog, config: &SearchConfig) -> Self {
        let mut by_origin: HashMap<Airport, Vec<FlightId>> = HashMap::new();
        for (id, flight) in catalog.iter() {
            by_origin.entry(flight.origin).or_default().push(id);
        }

        let successors: Vec<Vec<FlightId>> = catalog
            .iter()
            .map(|(_, incoming)| {
                let mut out: Vec<FlightId> = by_origin
                    .get(&incoming.destination)
                    .map(|ids| ids.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .copied()
                    .filter(|&cand| valid_transition(incoming, catalog.flight(cand), config))
                    .collect();
                out.sort_by(|&a, &b| {
                    catalog
                        .flight(b)
                        .departure
                        .cmp(&catalog.flight(a).departure)
                });
                out
            })
            .collect();

        let connections: usize = successors.iter().map(Vec::len).sum();
        debug!(
            flights = catalog.len(),
            airports = by_origin.len(),
            connections,
            "built adjacency index"
        );

        Self {
            by_origin,
            successors,
        }
    }

    /// All flights departing from an airport, in catalog order.
    pub fn departures_from(&self, airport: Airport) -> &[FlightId] {
        self.by_origin
            .get(&airport)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Legal successor flights of a flight.
    pub fn successors_of(&self, id: FlightId) -> &[FlightId] {
        &self.successors[id.index()]
    }

    /// Total number of legal transitions in the catalog.
    pub fn connection_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }
}
