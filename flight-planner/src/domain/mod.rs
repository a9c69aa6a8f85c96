//! Domain types for the flight itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated schedule data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod airport;
mod flight;

pub use airport::{Airport, InvalidAirport};
pub use flight::{Flight, FlightId};
