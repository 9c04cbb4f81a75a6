//! Shared domain types for the Olympics dashboard.
//!
//! Raw and canonical record types, query parameter selections, the error
//! taxonomy, CLI settings and display formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, LoadError, QueryParameterError, Result};
