use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the two source tables at startup.
///
/// Every variant is fatal: the dashboard never runs on a partially loaded
/// dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist.
    #[error("Data file not found: {0}")]
    FileNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The declared or inferred format is not one the loader understands.
    #[error("Unsupported format for {path}: {detail}")]
    UnsupportedFormat { path: PathBuf, detail: String },

    /// A required column is absent from the header row.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A cell could not be converted to its typed value.
    #[error("Malformed record in {path} at line {line}: {message}")]
    Malformed {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// The CSV reader itself failed (bad quoting, truncated gzip stream, ...).
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A selection that lies outside the enumerable parameter domains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryParameterError {
    #[error("Unknown year: {0}")]
    UnknownYear(String),

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("Unknown sport: {0}")]
    UnknownSport(String),

    /// The view needs a specific value for this dimension.
    #[error("A specific {0} must be selected for this view")]
    OverallNotAllowed(&'static str),
}

/// All errors produced by the Olympics dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Query(#[from] QueryParameterError),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// `true` when the user picked a value outside the selectable domains.
    pub fn is_bad_selection(&self) -> bool {
        matches!(self, DashboardError::Query(_))
    }

    /// Message suitable for showing to the user, separating "bad selection"
    /// from "data unavailable".
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Query(e) => format!("Invalid selection: {}", e),
            DashboardError::Load(e) => format!("Data unavailable: {}", e),
            other => format!("Error: {}", other),
        }
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
