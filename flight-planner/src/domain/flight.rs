//! Scheduled flight record.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use super::Airport;

/// Index of a flight within the catalog.
///
/// Every structure built on top of the catalog (adjacency index, search
/// states, completed plans) refers to flights by id rather than by value,
/// so a flight is stored exactly once and shared read-only by all workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightId(pub u32);

impl FlightId {
    /// Returns the id as a usize index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single scheduled flight.
///
/// Immutable once constructed. Identity is the whole record: two flights
/// with the same origin, destination, number and departure are the same
/// flight.
///
/// # Invariants
///
/// - `arrival >= departure` (enforced by the catalog loader)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Flight {
    /// Departure airport.
    pub origin: Airport,

    /// Arrival airport.
    pub destination: Airport,

    /// Flight number.
    pub number: u32,

    /// Scheduled departure timestamp.
    pub departure: NaiveDateTime,

    /// Scheduled arrival timestamp.
    pub arrival: NaiveDateTime,
}

impl Flight {
    /// Create a new flight record.
    pub fn new(
        origin: Airport,
        destination: Airport,
        number: u32,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
    ) -> Self {
        Self {
            origin,
            destination,
            number,
            departure,
            arrival,
        }
    }

    /// Time spent in the air.
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }
}

impl fmt::Debug for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flight({} -> {}, #{}, {} -> {})",
            self.origin, self.destination, self.number, self.departure, self.arrival
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn duration_is_arrival_minus_departure() {
        let flight = Flight::new(airport("BOS"), airport("JFK"), 100, ts(1, 9, 0), ts(1, 10, 30));
        assert_eq!(flight.duration(), Duration::minutes(90));
    }

    #[test]
    fn identity_is_the_whole_record() {
        let a = Flight::new(airport("BOS"), airport("JFK"), 100, ts(1, 9, 0), ts(1, 10, 30));
        let b = Flight::new(airport("BOS"), airport("JFK"), 100, ts(1, 9, 0), ts(1, 10, 30));
        let c = Flight::new(airport("BOS"), airport("JFK"), 100, ts(2, 9, 0), ts(2, 10, 30));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_format() {
        let flight = Flight::new(airport("BOS"), airport("JFK"), 7, ts(1, 9, 0), ts(1, 10, 30));
        let s = format!("{:?}", flight);
        assert!(s.contains("BOS -> JFK"));
        assert!(s.contains("#7"));
    }
}
