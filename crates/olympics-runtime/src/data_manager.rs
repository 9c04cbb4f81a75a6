//! One-shot dataset manager for the dashboard runtime.
//!
//! Loads both source files, builds the canonical table once and hands out
//! read-only handles to it. Callers use [`DataManager::load`] at startup and
//! [`DataManager::dashboard`] to obtain a query front-end; there is no
//! reloading after startup.

use std::time::Instant;

use chrono::{DateTime, Utc};
use olympics_core::models::CanonicalTable;
use olympics_core::LoadError;
use olympics_data::loader::{load_dataset, DatasetPaths, RawDataset};
use olympics_data::preprocessor::preprocess;
use olympics_data::query::QueryDomains;
use serde::Serialize;
use tracing::{debug, info};

use crate::dashboard::Dashboard;

// ── LoadMetadata ──────────────────────────────────────────────────────────────

/// Facts about the startup load, shown in the header and the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadMetadata {
    /// When the canonical table became available.
    pub loaded_at: DateTime<Utc>,
    /// Event records read from disk, Winter Games included.
    pub raw_events: usize,
    /// Rows of the canonical table.
    pub canonical_rows: usize,
    /// Entries in the region lookup.
    pub regions: usize,
    pub load_time_seconds: f64,
    pub transform_time_seconds: f64,
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Owner of the canonical table and its parameter domains.
///
/// # Example
/// ```no_run
/// use olympics_data::loader::DatasetPaths;
/// use olympics_runtime::data_manager::DataManager;
///
/// let paths = DatasetPaths::new("athlete_events.csv.gz", "noc_regions.csv").unwrap();
/// let manager = DataManager::load(paths).unwrap();
/// println!("{} rows", manager.metadata().canonical_rows);
/// ```
#[derive(Debug)]
pub struct DataManager {
    paths: DatasetPaths,
    table: CanonicalTable,
    domains: QueryDomains,
    metadata: LoadMetadata,
}

impl DataManager {
    /// Read both files and build the canonical table.
    ///
    /// Any [`LoadError`] is fatal; the caller should not start the UI.
    pub fn load(paths: DatasetPaths) -> Result<Self, LoadError> {
        info!(
            "Loading dataset from {} and {}",
            paths.events.display(),
            paths.regions.display()
        );

        let start = Instant::now();
        let raw = load_dataset(&paths)?;
        let load_time = start.elapsed().as_secs_f64();

        Ok(Self::from_raw(paths, raw, load_time))
    }

    /// Build from already loaded source tables.
    pub fn from_raw(paths: DatasetPaths, raw: RawDataset, load_time_seconds: f64) -> Self {
        let start = Instant::now();
        let table = preprocess(&raw.events, &raw.regions);
        let domains = QueryDomains::from_table(&table);
        let transform_time = start.elapsed().as_secs_f64();

        let metadata = LoadMetadata {
            loaded_at: Utc::now(),
            raw_events: raw.events.len(),
            canonical_rows: table.len(),
            regions: raw.regions.len(),
            load_time_seconds,
            transform_time_seconds: transform_time,
        };

        debug!(
            "Canonical table ready: {} rows from {} events (load {:.3}s, transform {:.3}s)",
            metadata.canonical_rows,
            metadata.raw_events,
            metadata.load_time_seconds,
            metadata.transform_time_seconds,
        );

        Self {
            paths,
            table,
            domains,
            metadata,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn table(&self) -> &CanonicalTable {
        &self.table
    }

    pub fn domains(&self) -> &QueryDomains {
        &self.domains
    }

    pub fn metadata(&self) -> &LoadMetadata {
        &self.metadata
    }

    pub fn paths(&self) -> &DatasetPaths {
        &self.paths
    }

    /// A query front-end sharing this manager's table.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.table.clone(), self.domains.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
