//! Parallel dispatch of the search across chunks of starting flights.
//!
//! The space of plans is partitioned by starting flight: every plan begins
//! with exactly one eligible start, so searching disjoint chunks of starts
//! and reducing with the plan comparator yields the same best plan as one
//! sequential pass over all of them.

use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::domain::FlightId;

use super::adjacency::AdjacencyIndex;
use super::config::SearchConfig;
use super::itinerary::CompletedPlan;
use super::score::PlanScore;
use super::search::{SearchEngine, SearchOutcome};

/// A chunk whose worker panicked. Its starts were not searched; the
/// caller can re-dispatch exactly this slice of the start list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkFailure {
    /// Index of the chunk within the dispatch.
    pub chunk: usize,
    /// Offset of the chunk's first start within the eligible-start list.
    pub first: usize,
    /// Number of starts in the chunk.
    pub len: usize,
}

/// Aggregated result of a parallel run.
#[derive(Debug)]
pub struct DispatchReport {
    /// Best plan across all chunks, if any qualified.
    pub best: Option<CompletedPlan>,

    /// Total states popped across all workers.
    pub states: u64,

    /// True iff every worker exhausted its chunk before any deadline.
    pub complete: bool,

    /// Chunks lost to worker panics; the report still reflects every
    /// chunk that finished.
    pub failures: Vec<ChunkFailure>,
}

/// Starting flights: departures from the start airport whose departure
/// date falls within the start window.
pub fn eligible_starts(catalog: &Catalog, config: &SearchConfig) -> Vec<FlightId> {
    catalog
        .iter()
        .filter(|(_, f)| {
            f.origin == config.start_airport
                && f.departure >= config.window_start
                && f.departure.date() <= config.latest_start
        })
        .map(|(id, _)| id)
        .collect()
}

/// Run the search over the whole catalog, split across `config.workers`
/// threads. Deterministic: chunk boundaries depend only on catalog order
/// and worker count, and the reduction is order-independent because the
/// plan ordering is total.
pub fn run(catalog: &Catalog, config: &SearchConfig, deadline: Option<Instant>) -> DispatchReport {
    let index = AdjacencyIndex::build(catalog, config);
    let starts = eligible_starts(catalog, config);
    if starts.is_empty() {
        info!("no eligible starting flights");
        return DispatchReport {
            best: None,
            states: 0,
            complete: true,
            failures: Vec::new(),
        };
    }

    let chunk_size = starts.len().div_ceil(config.workers);
    let chunks: Vec<&[FlightId]> = starts.chunks(chunk_size).collect();
    info!(
        starts = starts.len(),
        chunks = chunks.len(),
        chunk_size,
        "dispatching search"
    );

    let outcomes = search_chunks(&chunks, &|chunk| {
        let mut engine = SearchEngine::new(catalog, &index, config);
        if let Some(deadline) = deadline {
            engine = engine.with_deadline(deadline);
        }
        engine.run(chunk)
    });
    reduce(outcomes, &chunks, chunk_size, config)
}

/// Run one search per chunk on scoped threads.
///
/// A panicking worker is captured at `join`; it never takes down the
/// dispatch or the other workers.
fn search_chunks<'a, F>(
    chunks: &[&'a [FlightId]],
    search: &F,
) -> Vec<(usize, thread::Result<SearchOutcome>)>
where
    F: Fn(&[FlightId]) -> SearchOutcome + Sync,
{
    thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .iter()
            .enumerate()
            .map(|(i, &chunk)| (i, scope.spawn(move || search(chunk))))
            .collect();
        handles
            .into_iter()
            .map(|(i, handle)| (i, handle.join()))
            .collect()
    })
}

/// Fold per-chunk outcomes into one report with the plan comparator.
fn reduce(
    outcomes: Vec<(usize, thread::Result<SearchOutcome>)>,
    chunks: &[&[FlightId]],
    chunk_size: usize,
    config: &SearchConfig,
) -> DispatchReport {
    let mut report = DispatchReport {
        best: None,
        states: 0,
        complete: true,
        failures: Vec::new(),
    };
    let mut best_score: Option<PlanScore> = None;

    for (i, outcome) in outcomes {
        match outcome {
            Ok(outcome) => {
                debug!(
                    chunk = i,
                    states = outcome.states,
                    complete = outcome.complete,
                    found = outcome.best.is_some(),
                    "chunk finished"
                );
                report.states += outcome.states;
                report.complete &= outcome.complete;
                if let Some(plan) = outcome.best {
                    let score = PlanScore::of(&plan, config);
                    if best_score.is_none_or(|b| score.beats(&b)) {
                        best_score = Some(score);
                        report.best = Some(plan);
                    }
                }
            }
            Err(_) => {
                warn!(chunk = i, "search worker panicked, chunk lost");
                report.failures.push(ChunkFailure {
                    chunk: i,
                    first: i * chunk_size,
                    len: chunks[i].len(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::testutil::{config, flight, ts};

    fn week_of_shuttles() -> Catalog {
        let mut flights = Vec::new();
        // a morning round trip to a different city each day
        for (day, city) in [(1, "JFK"), (2, "PHL"), (3, "RDU"), (4, "BWI")] {
            flights.push(flight("BOS", city, day, ts(day, 8, 0), ts(day, 9, 30)));
            flights.push(flight(city, "BOS", day + 10, ts(day, 11, 0), ts(day, 12, 30)));
        }
        Catalog::new(flights)
    }

    #[test]
    fn eligible_starts_respect_the_window() {
        let mut config = config();
        config.latest_start = ts(2, 0, 0).date();

        let flights = vec![
            flight("BOS", "JFK", 1, ts(1, 9, 0), ts(1, 10, 30)),
            flight("BOS", "JFK", 2, ts(2, 9, 0), ts(2, 10, 30)),
            // departs after latest_start
            flight("BOS", "JFK", 3, ts(3, 9, 0), ts(3, 10, 30)),
            // wrong origin
            flight("JFK", "BOS", 4, ts(1, 12, 0), ts(1, 13, 30)),
        ];
        let catalog = Catalog::new(flights);

        let starts = eligible_starts(&catalog, &config);
        assert_eq!(starts, vec![FlightId(0), FlightId(1)]);
    }

    #[test]
    fn result_does_not_depend_on_worker_count() {
        let mut base = config();
        base.min_destinations = 1;

        let catalog = week_of_shuttles();

        let sequential = run(&catalog, &base, None);
        let plan = sequential.best.as_ref().expect("plan");
        let sequential_score = PlanScore::of(plan, &base);

        let mut parallel_config = base.clone();
        parallel_config.workers = 3;
        let parallel = run(&catalog, &parallel_config, None);
        let parallel_plan = parallel.best.as_ref().expect("plan");

        assert_eq!(PlanScore::of(parallel_plan, &base), sequential_score);
        assert_eq!(parallel.states, sequential.states);
        assert!(sequential.complete && parallel.complete);
        assert!(parallel.failures.is_empty());
    }

    #[test]
    fn more_workers_than_starts_is_fine() {
        let mut config = config();
        config.min_destinations = 1;
        config.workers = 64;

        let report = run(&week_of_shuttles(), &config, None);
        assert!(report.complete);
        assert!(report.best.is_some());
    }

    #[test]
    fn panicking_worker_loses_only_its_chunk() {
        let mut config = config();
        config.min_destinations = 1;

        let catalog = week_of_shuttles();
        let index = AdjacencyIndex::build(&catalog, &config);
        let starts = eligible_starts(&catalog, &config);
        let chunk_size = 2;
        let chunks: Vec<&[FlightId]> = starts.chunks(chunk_size).collect();
        assert_eq!(chunks.len(), 2);

        let engine = SearchEngine::new(&catalog, &index, &config);
        let outcomes = search_chunks(&chunks, &|chunk| {
            if chunk.contains(&starts[0]) {
                panic!("injected worker failure");
            }
            engine.run(chunk)
        });
        let report = reduce(outcomes, &chunks, chunk_size, &config);

        assert_eq!(
            report.failures,
            vec![ChunkFailure {
                chunk: 0,
                first: 0,
                len: 2,
            }]
        );
        // the surviving chunk is still reduced
        let survivor = engine.run(chunks[1]);
        assert_eq!(report.states, survivor.states);
        assert!(report.complete);
        let plan = report.best.expect("surviving chunk finds a plan");
        assert_eq!(
            PlanScore::of(&plan, &config),
            PlanScore::of(&survivor.best.unwrap(), &config)
        );
    }

    #[test]
    fn empty_catalog_yields_an_empty_complete_report() {
        let config = config();
        let report = run(&Catalog::new(Vec::new()), &config, None);
        assert!(report.complete);
        assert!(report.best.is_none());
        assert_eq!(report.states, 0);
    }
}
