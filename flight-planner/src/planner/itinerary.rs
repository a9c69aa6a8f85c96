//! Partial itineraries and completed plans.
//!
//! Sibling search states share long common prefixes, so the flights taken
//! so far are kept in an arena of parent-linked nodes: appending a leg is
//! one arena push and never copies the prefix. The full sequence is only
//! materialised when a plan is accepted.

use std::collections::{BTreeSet, HashSet};

use chrono::Duration;

use crate::catalog::Catalog;
use crate::domain::{Airport, Flight, FlightId};

use super::config::SearchConfig;
use super::transition::is_overnight;

/// Index of a node in a [`LegArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

#[derive(Debug)]
struct Node {
    flight: FlightId,
    parent: Option<NodeId>,
    legs: u32,
}

/// Arena of parent-linked itinerary legs.
///
/// Owned by a single search worker; never shared.
#[derive(Debug, Default)]
pub struct LegArena {
    nodes: Vec<Node>,
}

impl LegArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new itinerary with its first leg.
    pub fn root(&mut self, flight: FlightId) -> NodeId {
        self.push(Node {
            flight,
            parent: None,
            legs: 1,
        })
    }

    /// Extend an itinerary by one leg. O(1); the prefix is shared.
    pub fn append(&mut self, parent: NodeId, flight: FlightId) -> NodeId {
        let legs = self.node(parent).legs + 1;
        self.push(Node {
            flight,
            parent: Some(parent),
            legs,
        })
    }

    /// The last flight of the itinerary ending at `node`.
    pub fn flight(&self, node: NodeId) -> FlightId {
        self.node(node).flight
    }

    /// Number of legs in the itinerary ending at `node`.
    pub fn legs(&self, node: NodeId) -> usize {
        self.node(node).legs as usize
    }

    /// Materialise the full flight sequence, first leg first.
    ///
    /// Walks the parent chain; only called at acceptance time.
    pub fn materialize(&self, node: NodeId) -> Vec<FlightId> {
        let mut flights = Vec::with_capacity(self.legs(node));
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let n = self.node(id);
            flights.push(n.flight);
            cursor = n.parent;
        }
        flights.reverse();
        flights
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn push(&mut self, node: Node) -> NodeId {
        // Aborting beats wrapping into an existing node's id
        let id = NodeId(u32::try_from(self.nodes.len()).expect("leg arena exceeds u32 capacity"));
        self.nodes.push(node);
        id
    }
}

/// A qualifying itinerary with its derived metrics.
///
/// Created only at acceptance time and retained only while it is the best
/// found so far.
#[derive(Debug, Clone)]
pub struct CompletedPlan {
    /// Flight sequence, first leg first.
    pub flights: Vec<FlightId>,

    /// Distinct destination airports visited (sorted).
    pub destinations: BTreeSet<Airport>,

    /// Last arrival minus first departure.
    pub total_duration: Duration,

    /// Total duration minus long rests at terminal airports.
    pub effective_duration: Duration,

    /// Unique calendar dates touched by any departure or arrival.
    pub distinct_days: usize,

    /// Number of overnight layovers.
    pub overnight_layovers: usize,
}

impl CompletedPlan {
    /// Assemble a plan from a materialised flight sequence.
    ///
    /// The sequence must be non-empty and connected; the search engine
    /// guarantees both.
    pub fn assemble(
        flights: Vec<FlightId>,
        visited: &HashSet<Airport>,
        catalog: &Catalog,
        config: &SearchConfig,
    ) -> Self {
        let legs: Vec<&Flight> = flights.iter().map(|&id| catalog.flight(id)).collect();

        let total_duration = legs[legs.len() - 1].arrival - legs[0].departure;
        let effective_duration = effective_duration(&legs, config);
        let distinct_days = distinct_days(&legs);
        let overnight_layovers = legs
            .windows(2)
            .filter(|pair| is_overnight(pair[0], pair[1], config))
            .count();

        Self {
            flights,
            destinations: visited.iter().copied().collect(),
            total_duration,
            effective_duration,
            distinct_days,
            overnight_layovers,
        }
    }

    /// Number of legs.
    pub fn legs(&self) -> usize {
        self.flights.len()
    }
}

/// Unique calendar dates touched by any departure or arrival.
fn distinct_days(legs: &[&Flight]) -> usize {
    let mut days = BTreeSet::new();
    for leg in legs {
        days.insert(leg.departure.date());
        days.insert(leg.arrival.date());
    }
    days.len()
}

/// Sum of leg durations plus layovers, excluding rests at a terminal
/// airport longer than `min_trip_gap` so multi-trip itineraries are not
/// penalised for time spent at home between sub-trips.
fn effective_duration(legs: &[&Flight], config: &SearchConfig) -> Duration {
    let mut duration = Duration::zero();
    for (i, leg) in legs.iter().enumerate() {
        duration += leg.duration();
        if let Some(next) = legs.get(i + 1) {
            let layover = next.departure - leg.arrival;
            if !config.is_terminal(leg.destination) || layover <= config.min_trip_gap {
                duration += layover;
            }
        }
    }
    duration
}
