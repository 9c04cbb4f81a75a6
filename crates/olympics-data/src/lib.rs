//! Data layer for the Olympics dashboard.
//!
//! Loads the two source tables, builds the canonical analysis table and
//! answers every reporting query against it.

pub mod aggregator;
pub mod loader;
pub mod preprocessor;
pub mod query;

#[cfg(test)]
pub(crate) mod test_support;

pub use olympics_core as core;
