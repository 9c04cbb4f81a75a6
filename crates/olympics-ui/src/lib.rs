//! Terminal UI layer for the Olympics dashboard.
//!
//! Provides themes, the header, medal bars and indicator components, table
//! and chart views, and the application event loop built on top of
//! [`ratatui`] for browsing the dataset in the terminal.

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use olympics_core as core;
