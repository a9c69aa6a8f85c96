//! Exhaustive itinerary search.
//!
//! Explores every pruned extension of every starting flight, keeping the
//! single best completed plan. The work list is explicit; depth-first
//! order is the default so memory is bounded by the longest incomplete
//! path times branching, not the full frontier width. FIFO order explores
//! the same space and finds the same best score, only in a different
//! discovery order.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::domain::{Airport, FlightId};

use super::adjacency::AdjacencyIndex;
use super::config::{SearchConfig, SearchStrategy};
use super::endpoint::valid_endpoint;
use super::itinerary::{CompletedPlan, LegArena, NodeId};
use super::score::PlanScore;

/// States between progress log events.
const PROGRESS_INTERVAL: u64 = 1 << 20;

/// Result of a search over one set of starting flights.
///
/// `best == None` after a complete run means the exhaustive search found
/// no qualifying plan. That is a valid empty result, not an error; callers
/// must branch on it.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Best completed plan, if any qualified.
    pub best: Option<CompletedPlan>,

    /// Number of states popped from the work list.
    pub states: u64,

    /// False iff the search stopped at the deadline before exhausting
    /// the pruned state space.
    pub complete: bool,
}

/// One partial itinerary on the work list.
struct SearchState {
    node: NodeId,
    visited: HashSet<Airport>,
    first_departure: NaiveDateTime,
}

/// Itinerary search engine over shared read-only data.
///
/// Each engine instance owns its private work list, arena and best-plan
/// accumulator; many instances may run concurrently against the same
/// catalog and index.
pub struct SearchEngine<'a> {
    catalog: &'a Catalog,
    index: &'a AdjacencyIndex,
    config: &'a SearchConfig,
    deadline: Option<Instant>,
}

impl<'a> SearchEngine<'a> {
    /// Create an engine. The configuration must already be validated.
    pub fn new(catalog: &'a Catalog, index: &'a AdjacencyIndex, config: &'a SearchConfig) -> Self {
        Self {
            catalog,
            index,
            config,
            deadline: None,
        }
    }

    /// Stop cooperatively at `deadline`, returning the best plan so far.
    ///
    /// Pruning bounds make the state space finite but it can still be
    /// enormous; the deadline is checked at every state pop.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Search exhaustively from the given starting flights.
    pub fn run(&self, starts: &[FlightId]) -> SearchOutcome {
        let config = self.config;
        let mut arena = LegArena::new();
        let mut work: VecDeque<SearchState> = VecDeque::new();

        for &flight in starts {
            let node = arena.root(flight);
            let f = self.catalog.flight(flight);
            work.push_back(SearchState {
                node,
                visited: HashSet::from([f.destination]),
                first_departure: f.departure,
            });
        }

        let mut best: Option<(PlanScore, CompletedPlan)> = None;
        // Best score per sorted destination set; a candidate that does not
        // beat its set's incumbent cannot beat the global best either.
        let mut best_by_destinations: HashMap<Vec<Airport>, PlanScore> = HashMap::new();
        let mut states: u64 = 0;

        while let Some(state) = match config.strategy {
            SearchStrategy::DepthFirst => work.pop_back(),
            SearchStrategy::BreadthFirst => work.pop_front(),
        } {
            states += 1;
            if states % PROGRESS_INTERVAL == 0 {
                debug!(states, queued = work.len(), "search progress");
            }
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    debug!(states, "deadline reached, stopping early");
                    return SearchOutcome {
                        best: best.map(|(_, plan)| plan),
                        states,
                        complete: false,
                    };
                }
            }

            let last_id = arena.flight(state.node);
            let last = self.catalog.flight(last_id);
            let legs = arena.legs(state.node);

            // Hard pruning: overall duration and duplicate-leg bounds.
            if last.arrival - state.first_departure > config.max_plan_duration
                || legs > state.visited.len() + config.max_duplicate_legs
            {
                continue;
            }

            if valid_endpoint(last, config) {
                if state.visited.len() >= config.min_destinations {
                    self.accept(&arena, &state, &mut best, &mut best_by_destinations);
                }

                // Resume with a fresh sub-trip after a rest at home.
                if state.visited.len() < config.destination_cap {
                    for &next in self.index.departures_from(config.start_airport) {
                        let gap = self.catalog.flight(next).departure - last.arrival;
                        if gap < config.min_trip_gap || gap > config.max_trip_gap {
                            continue;
                        }
                        Self::push(&mut work, &mut arena, &state, next, self.catalog);
                    }
                }
            }

            for &next in self.index.successors_of(last_id) {
                let destination = self.catalog.flight(next).destination;
                // No turnarounds to the airport we just came from while the
                // plan is still in its early half.
                if 2 * legs < config.min_destinations && destination == last.origin {
                    continue;
                }
                // No heading home before enough of the plan exists to end.
                if legs < config.min_destinations && destination == config.start_airport {
                    continue;
                }
                Self::push(&mut work, &mut arena, &state, next, self.catalog);
            }
        }

        SearchOutcome {
            best: best.map(|(_, plan)| plan),
            states,
            complete: true,
        }
    }

    /// Materialise, score and keep a qualifying plan if it is a new best.
    fn accept(
        &self,
        arena: &LegArena,
        state: &SearchState,
        best: &mut Option<(PlanScore, CompletedPlan)>,
        best_by_destinations: &mut HashMap<Vec<Airport>, PlanScore>,
    ) {
        let flights = arena.materialize(state.node);
        let plan = CompletedPlan::assemble(flights, &state.visited, self.catalog, self.config);
        let score = PlanScore::of(&plan, self.config);

        let key: Vec<Airport> = plan.destinations.iter().copied().collect();
        if let Some(incumbent) = best_by_destinations.get(&key) {
            if !score.beats(incumbent) {
                trace!(legs = plan.legs(), "destination set already covered by a better plan");
                return;
            }
        }
        best_by_destinations.insert(key, score);

        if best.as_ref().is_none_or(|(b, _)| score.beats(b)) {
            debug!(
                destinations = plan.destinations.len(),
                legs = plan.legs(),
                days = plan.distinct_days,
                overnights = plan.overnight_layovers,
                "new best plan"
            );
            *best = Some((score, plan));
        }
    }

    fn push(
        work: &mut VecDeque<SearchState>,
        arena: &mut LegArena,
        state: &SearchState,
        next: FlightId,
        catalog: &Catalog,
    ) {
        let mut visited = state.visited.clone();
        visited.insert(catalog.flight(next).destination);
        work.push_back(SearchState {
            node: arena.append(state.node, next),
            visited,
            first_departure: state.first_departure,
        });
    }
}
