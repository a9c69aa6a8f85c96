//! Endpoint validation: may an itinerary legally end at this flight?

use crate::domain::Flight;

use super::config::SearchConfig;

/// Whether an itinerary may legally end with `flight`.
///
/// True iff the flight's destination is a configured terminal airport, the
/// flight lies within the overall search window, and, where the terminal
/// carries an arrival window, the arrival clock time falls strictly inside
/// that window.
pub fn valid_endpoint(flight: &Flight, config: &SearchConfig) -> bool {
    let Some(rule) = config.terminal(flight.destination) else {
        return false;
    };

    if flight.departure < config.window_start || flight.arrival > config.window_end {
        return false;
    }

    match rule.arrival_window {
        Some(window) => window.contains(flight.arrival.time()),
        None => true,
    }
}
