//! Core domain types and helpers for the habit analyzer.
//!
//! Holds the data model (habits, observations, rate tables), the completion
//! classification rule, error types, calendar helpers, percentage formatting
//! and the CLI settings shared by the other crates.

pub mod classify;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
