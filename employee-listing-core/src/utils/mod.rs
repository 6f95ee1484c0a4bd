//! Utility modules

pub mod coerce;
pub mod datetime;
