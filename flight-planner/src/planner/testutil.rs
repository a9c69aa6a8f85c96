//! Shared fixtures for planner tests.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::{Airport, Flight};

use super::config::{SearchConfig, SearchStrategy, TerminalRule};

pub(crate) fn airport(s: &str) -> Airport {
    Airport::parse(s).unwrap()
}

/// Timestamp in September 2025, the month all fixtures live in.
pub(crate) fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub(crate) fn flight(from: &str, to: &str, number: u32, dep: NaiveDateTime, arr: NaiveDateTime) -> Flight {
    Flight::new(airport(from), airport(to), number, dep, arr)
}

/// A BOS-centred configuration with generous bounds.
///
/// Tests override individual fields as needed.
pub(crate) fn config() -> SearchConfig {
    SearchConfig {
        window_start: ts(1, 0, 0),
        window_end: NaiveDate::from_ymd_opt(2025, 9, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        latest_start: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
        min_layover: Duration::minutes(50),
        max_layover: Duration::hours(18),
        max_day_layover: None,
        overnight_threshold: Duration::hours(3),
        overnight_checkpoint: NaiveTime::from_hms_opt(3, 0, 0).unwrap(),
        overnight_airports: HashSet::from([airport("RDU")]),
        min_trip_gap: Duration::days(3),
        max_trip_gap: Duration::days(7),
        max_plan_duration: Duration::days(28),
        min_destinations: 2,
        max_duplicate_legs: 2,
        destination_cap: 10,
        start_airport: airport("BOS"),
        terminals: vec![TerminalRule::open(airport("BOS"))],
        strategy: SearchStrategy::default(),
        workers: 1,
    }
}
