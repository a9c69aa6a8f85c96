//! Plan scoring and the strict best-plan ordering.

use std::cmp::{Ordering, Reverse};

use chrono::Duration;

use super::config::SearchConfig;
use super::itinerary::CompletedPlan;

/// Score of a completed plan.
///
/// Plans are ranked lexicographically, best first:
///
/// 1. distinct destinations, descending, capped at `destination_cap`
///    (extra destinations beyond the cap do not improve rank);
/// 2. distinct-day count, ascending;
/// 3. leg count + overnight-layover count, ascending;
/// 4. effective duration, ascending.
///
/// The ordering is strict: an equal tuple never replaces the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanScore {
    /// Distinct destinations, capped.
    pub destinations: usize,

    /// Unique calendar dates touched.
    pub distinct_days: usize,

    /// Legs plus overnight layovers.
    pub legs_and_overnights: usize,

    /// Effective duration.
    pub effective_duration: Duration,
}

impl PlanScore {
    /// Score a completed plan under a configuration.
    pub fn of(plan: &CompletedPlan, config: &SearchConfig) -> Self {
        Self {
            destinations: plan.destinations.len().min(config.destination_cap),
            distinct_days: plan.distinct_days,
            legs_and_overnights: plan.legs() + plan.overnight_layovers,
            effective_duration: plan.effective_duration,
        }
    }

    /// Whether this score strictly outranks `other`.
    pub fn beats(&self, other: &PlanScore) -> bool {
        self.key() < other.key()
    }

    fn key(&self) -> (Reverse<usize>, usize, usize, Duration) {
        (
            Reverse(self.destinations),
            self.distinct_days,
            self.legs_and_overnights,
            self.effective_duration,
        )
    }
}

impl Ord for PlanScore {
    /// `Less` means better.
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for PlanScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
