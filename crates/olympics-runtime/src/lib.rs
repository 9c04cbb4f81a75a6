//! Runtime layer for the Olympics dashboard.
//!
//! Loads the dataset once at startup and serves validated, memoised view
//! queries to the presentation layer.

pub mod dashboard;
pub mod data_manager;

pub use olympics_core as core;
pub use olympics_data as data;
