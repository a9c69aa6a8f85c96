//! Flight itinerary planner.
//!
//! Builds long multi-leg itineraries from a catalog of scheduled flights:
//! out from a home airport, through as many distinct destinations as
//! possible, and back, subject to layover, overnight and trip-gap rules.

pub mod catalog;
pub mod domain;
pub mod planner;
