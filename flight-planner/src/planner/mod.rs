//! Itinerary planner over a scheduled flight catalog.
//!
//! The planner answers: "starting and ending at my home airport, what is
//! the best long multi-leg itinerary I can fly within this window?" It
//! builds an adjacency index of legally-connectable flights, searches every
//! pruned extension of every eligible starting flight, and keeps the
//! single best completed plan under a lexicographic ordering.

mod adjacency;
mod config;
mod dispatch;
mod endpoint;
mod itinerary;
mod score;
mod search;
mod transition;

#[cfg(test)]
mod testutil;

pub use adjacency::AdjacencyIndex;
pub use config::{ArrivalWindow, ConfigError, SearchConfig, SearchStrategy, TerminalRule};
pub use dispatch::{ChunkFailure, DispatchReport, eligible_starts, run};
pub use endpoint::valid_endpoint;
pub use itinerary::CompletedPlan;
pub use score::PlanScore;
pub use search::{SearchEngine, SearchOutcome};
pub use transition::{is_overnight, valid_transition};
