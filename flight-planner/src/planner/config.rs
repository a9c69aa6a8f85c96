//! Search configuration for the itinerary planner.
//!
//! All thresholds are fixed for a run and never mutated; the configuration
//! value is passed explicitly to every component so concurrent runs with
//! different parameters cannot interfere.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::Airport;

/// Contradictory configuration, detected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Layover bounds leave no acceptable layover
    #[error("min_layover must be strictly below max_layover")]
    LayoverBounds,

    /// Day layover bound exceeds the overall maximum
    #[error("max_day_layover must not exceed max_layover")]
    DayLayoverAboveMax,

    /// Trip-gap bounds leave no acceptable gap
    #[error("min_trip_gap must not exceed max_trip_gap")]
    TripGapBounds,

    /// Search window is empty or inverted
    #[error("window_start must be before window_end")]
    EmptyWindow,

    /// Latest start date falls outside the search window
    #[error("latest_start must lie within the search window")]
    LatestStartOutsideWindow,

    /// The start airport must be a legal endpoint
    #[error("start airport {0} is not in the terminal set")]
    StartNotTerminal(Airport),

    /// At least one destination must be required
    #[error("min_destinations must be at least 1")]
    NoDestinationsRequired,

    /// Scoring cap below the completion threshold
    #[error("destination_cap must be at least min_destinations")]
    CapBelowMinimum,

    /// At least one worker is needed
    #[error("workers must be at least 1")]
    NoWorkers,
}

/// Clock-time window for arrivals at a terminal airport.
///
/// Both bounds are exclusive: an arrival exactly on a bound is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalWindow {
    /// Earliest acceptable arrival clock time.
    pub earliest: NaiveTime,

    /// Latest acceptable arrival clock time.
    pub latest: NaiveTime,
}

impl ArrivalWindow {
    /// Create a new arrival window.
    pub fn new(earliest: NaiveTime, latest: NaiveTime) -> Self {
        Self { earliest, latest }
    }

    /// Whether an arrival clock time falls strictly inside the window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.earliest < time && time < self.latest
    }
}

/// An airport at which an itinerary may legally end.
///
/// The home terminal and regional terminals may carry different arrival
/// windows; a terminal without a window accepts arrivals at any clock time.
#[derive(Debug, Clone)]
pub struct TerminalRule {
    /// The terminal airport.
    pub airport: Airport,

    /// Arrival clock-time window, if any.
    pub arrival_window: Option<ArrivalWindow>,
}

impl TerminalRule {
    /// A terminal that accepts arrivals at any clock time.
    pub fn open(airport: Airport) -> Self {
        Self {
            airport,
            arrival_window: None,
        }
    }

    /// A terminal with an arrival clock-time window.
    pub fn windowed(airport: Airport, earliest: NaiveTime, latest: NaiveTime) -> Self {
        Self {
            airport,
            arrival_window: Some(ArrivalWindow::new(earliest, latest)),
        }
    }
}

/// Work-list discipline for the search.
///
/// Both strategies explore the same pruned state space; they differ only in
/// discovery order. Depth-first bounds memory by the longest incomplete
/// path rather than the full frontier width, so it is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// LIFO work list (depth-first).
    #[default]
    DepthFirst,

    /// FIFO work list (breadth-first).
    BreadthFirst,
}

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Start of the overall search window.
    pub window_start: NaiveDateTime,

    /// End of the overall search window.
    pub window_end: NaiveDateTime,

    /// Latest departure date for the first leg of an itinerary.
    pub latest_start: NaiveDate,

    /// Minimum layover between legs (exclusive bound).
    pub min_layover: Duration,

    /// Maximum layover between legs (exclusive bound).
    pub max_layover: Duration,

    /// Daytime layover bound, if distinct from `max_layover`. A layover
    /// above this bound is accepted only when it is overnight at an
    /// allow-listed airport.
    pub max_day_layover: Option<Duration>,

    /// Minimum layover length before it can count as overnight.
    pub overnight_threshold: Duration,

    /// Daily checkpoint clock time; a layover is overnight iff it spans
    /// this time (and exceeds the threshold).
    pub overnight_checkpoint: NaiveTime,

    /// Airports where overnight layovers are permitted.
    pub overnight_airports: HashSet<Airport>,

    /// Minimum rest between sub-trips at the start airport (inclusive).
    pub min_trip_gap: Duration,

    /// Maximum rest between sub-trips at the start airport (inclusive).
    pub max_trip_gap: Duration,

    /// Maximum elapsed time of a whole plan.
    pub max_plan_duration: Duration,

    /// Minimum distinct destinations for a plan to qualify.
    pub min_destinations: usize,

    /// How many legs beyond the distinct-destination count are tolerated.
    pub max_duplicate_legs: usize,

    /// Destination count beyond which extra destinations stop improving
    /// the score, and beyond which no new sub-trips are started.
    pub destination_cap: usize,

    /// Airport every itinerary starts from.
    pub start_airport: Airport,

    /// Airports an itinerary may legally end at.
    pub terminals: Vec<TerminalRule>,

    /// Work-list discipline.
    pub strategy: SearchStrategy,

    /// Number of parallel workers (chunks).
    pub workers: usize,
}

impl SearchConfig {
    /// Check the configuration for contradictions.
    ///
    /// Called once before any search; a failed check aborts the run rather
    /// than silently yielding a wrong answer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_layover >= self.max_layover {
            return Err(ConfigError::LayoverBounds);
        }
        if let Some(day) = self.max_day_layover {
            if day > self.max_layover {
                return Err(ConfigError::DayLayoverAboveMax);
            }
        }
        if self.min_trip_gap > self.max_trip_gap {
            return Err(ConfigError::TripGapBounds);
        }
        if self.window_start >= self.window_end {
            return Err(ConfigError::EmptyWindow);
        }
        if self.latest_start < self.window_start.date() || self.latest_start > self.window_end.date()
        {
            return Err(ConfigError::LatestStartOutsideWindow);
        }
        if !self.is_terminal(self.start_airport) {
            return Err(ConfigError::StartNotTerminal(self.start_airport));
        }
        if self.min_destinations == 0 {
            return Err(ConfigError::NoDestinationsRequired);
        }
        if self.destination_cap < self.min_destinations {
            return Err(ConfigError::CapBelowMinimum);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }

    /// Look up the terminal rule for an airport, if it is a terminal.
    pub fn terminal(&self, airport: Airport) -> Option<&TerminalRule> {
        self.terminals.iter().find(|t| t.airport == airport)
    }

    /// Whether an airport is a legal endpoint.
    pub fn is_terminal(&self, airport: Airport) -> bool {
        self.terminal(airport).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn base_config() -> SearchConfig {
        let window_start = NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let window_end = NaiveDate::from_ymd_opt(2025, 11, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        SearchConfig {
            window_start,
            window_end,
            latest_start: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            min_layover: Duration::minutes(50),
            max_layover: Duration::hours(18),
            max_day_layover: Some(Duration::hours(5)),
            overnight_threshold: Duration::hours(3),
            overnight_checkpoint: NaiveTime::from_hms_opt(3, 0, 0).unwrap(),
            overnight_airports: HashSet::from([airport("PVD"), airport("RDU")]),
            min_trip_gap: Duration::days(3),
            max_trip_gap: Duration::days(7),
            max_plan_duration: Duration::days(28),
            min_destinations: 5,
            max_duplicate_legs: 2,
            destination_cap: 10,
            start_airport: airport("BOS"),
            terminals: vec![
                TerminalRule::open(airport("BOS")),
                TerminalRule::windowed(
                    airport("PVD"),
                    NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
                ),
            ],
            strategy: SearchStrategy::default(),
            workers: 2,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(base_config().validate(), Ok(()));
    }

    #[test]
    fn inverted_layover_bounds_rejected() {
        let mut config = base_config();
        config.min_layover = Duration::hours(18);
        config.max_layover = Duration::minutes(50);
        assert_eq!(config.validate(), Err(ConfigError::LayoverBounds));

        // equal bounds are contradictory too: both are exclusive
        config.max_layover = Duration::hours(18);
        assert_eq!(config.validate(), Err(ConfigError::LayoverBounds));
    }

    #[test]
    fn day_bound_above_overall_max_rejected() {
        let mut config = base_config();
        config.max_day_layover = Some(Duration::hours(20));
        assert_eq!(config.validate(), Err(ConfigError::DayLayoverAboveMax));
    }

    #[test]
    fn inverted_trip_gap_rejected() {
        let mut config = base_config();
        config.min_trip_gap = Duration::days(8);
        assert_eq!(config.validate(), Err(ConfigError::TripGapBounds));
    }

    #[test]
    fn empty_window_rejected() {
        let mut config = base_config();
        config.window_end = config.window_start;
        assert_eq!(config.validate(), Err(ConfigError::EmptyWindow));
    }

    #[test]
    fn latest_start_outside_window_rejected() {
        let mut config = base_config();
        config.latest_start = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::LatestStartOutsideWindow));
    }

    #[test]
    fn start_airport_must_be_terminal() {
        let mut config = base_config();
        config.start_airport = airport("JFK");
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartNotTerminal(airport("JFK")))
        );
    }

    #[test]
    fn zero_min_destinations_rejected() {
        let mut config = base_config();
        config.min_destinations = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoDestinationsRequired));
    }

    #[test]
    fn cap_below_minimum_rejected() {
        let mut config = base_config();
        config.destination_cap = 4;
        assert_eq!(config.validate(), Err(ConfigError::CapBelowMinimum));
    }

    #[test]
    fn zero_workers_rejected() {
        let mut config = base_config();
        config.workers = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoWorkers));
    }

    #[test]
    fn arrival_window_bounds_are_exclusive() {
        let window = ArrivalWindow::new(
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        );
        assert!(!window.contains(NaiveTime::from_hms_opt(6, 0, 0).unwrap()));
        assert!(window.contains(NaiveTime::from_hms_opt(6, 0, 1).unwrap()));
        assert!(window.contains(NaiveTime::from_hms_opt(20, 59, 59).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(21, 0, 0).unwrap()));
    }

    #[test]
    fn terminal_lookup() {
        let config = base_config();
        assert!(config.is_terminal(airport("BOS")));
        assert!(config.is_terminal(airport("PVD")));
        assert!(!config.is_terminal(airport("JFK")));
        assert!(config.terminal(airport("PVD")).unwrap().arrival_window.is_some());
    }
}
