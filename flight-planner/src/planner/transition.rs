//! Transition validation: is moving from one flight to the next legal?
//!
//! Pure predicates with no side effects. A candidate that fails a predicate
//! is simply excluded from expansion; predicates never raise errors.

use crate::domain::Flight;

use super::config::SearchConfig;

/// Classify a layover as overnight.
///
/// A layover is overnight iff it exceeds the configured threshold and the
/// inclusive interval `[incoming.arrival, outgoing.departure]` contains the
/// daily checkpoint time, anchored to the outgoing departure's date.
pub fn is_overnight(incoming: &Flight, outgoing: &Flight, config: &SearchConfig) -> bool {
    let layover = outgoing.departure - incoming.arrival;
    if layover <= config.overnight_threshold {
        return false;
    }
    let checkpoint = outgoing
        .departure
        .date()
        .and_time(config.overnight_checkpoint);
    incoming.arrival <= checkpoint && checkpoint <= outgoing.departure
}

/// Whether an itinerary may continue from `incoming` onto `outgoing`.
///
/// Checks, in order:
///
/// 1. destination continuity: `outgoing` departs where `incoming` lands;
/// 2. the layover lies strictly inside `(min_layover, max_layover)`;
///    boundary values are rejected;
/// 3. an overnight layover is only legal at an allow-listed airport;
/// 4. with a day/night split configured, a layover above the day bound is
///    only legal when it is overnight (and hence allow-listed by rule 3).
pub fn valid_transition(incoming: &Flight, outgoing: &Flight, config: &SearchConfig) -> bool {
    if outgoing.origin != incoming.destination {
        return false;
    }

    let layover = outgoing.departure - incoming.arrival;
    if layover <= config.min_layover || layover >= config.max_layover {
        return false;
    }

    let overnight = is_overnight(incoming, outgoing, config);
    if overnight && !config.overnight_airports.contains(&incoming.destination) {
        return false;
    }
    if let Some(day_max) = config.max_day_layover {
        if !overnight && layover > day_max {
            return false;
        }
    }

    true
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Airport;
    use crate::planner::testutil;
    use chrono::Duration;
    use proptest::prelude::*;

    proptest! {
        /// Every accepted transition has destination continuity and a
        /// layover strictly inside the configured bounds.
        #[test]
        fn accepted_transitions_satisfy_bounds(
            arr_offset_mins in 0i64..2880,
            layover_mins in -120i64..1800,
            flight_mins in 30i64..300,
        ) {
            let config = testutil::config();
            let arrival = testutil::ts(1, 0, 0) + Duration::minutes(arr_offset_mins);
            let incoming = Flight::new(
                Airport::parse("BOS").unwrap(),
                Airport::parse("JFK").unwrap(),
                1,
                arrival - Duration::minutes(flight_mins),
                arrival,
            );
            let departure = arrival + Duration::minutes(layover_mins);
            let outgoing = Flight::new(
                Airport::parse("JFK").unwrap(),
                Airport::parse("BOS").unwrap(),
                2,
                departure,
                departure + Duration::minutes(flight_mins),
            );

            if valid_transition(&incoming, &outgoing, &config) {
                let layover = outgoing.departure - incoming.arrival;
                prop_assert_eq!(outgoing.origin, incoming.destination);
                prop_assert!(layover > config.min_layover);
                prop_assert!(layover < config.max_layover);
                // JFK is not allow-listed, so nothing accepted is overnight
                prop_assert!(!is_overnight(&incoming, &outgoing, &config));
            }
        }
    }
}
