//! Data layer for the habit analyzer.
//!
//! Responsible for reading and merging the habit-tracker CSV exports,
//! aggregating completion rates over time windows, building the
//! month-over-month comparison, and formatting the report tables.

pub mod aggregator;
pub mod analysis;
pub mod loader;
pub mod reporter;

pub use habits_core as core;
