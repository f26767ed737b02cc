//! Test fixtures for sea-route-planner.
//!
//! Provides:
//! - Real ports and waypoints of a round-the-world itinerary
//! - Synthetic land classifiers with known geometry
//! - Stub routing services (counting, failing, scripted)

#![allow(dead_code)]

pub mod itinerary_stops;
pub mod synthetic;

pub use itinerary_stops::*;
pub use synthetic::*;
