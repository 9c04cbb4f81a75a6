//! CSV discovery and loading for the Olympics dashboard.
//!
//! Reads the athlete event records (plain or gzip-compressed CSV) and the
//! NOC → region lookup (plain CSV) into typed in-memory structures. Any
//! problem with either file is a [`LoadError`]; nothing is partially loaded.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use olympics_core::error::LoadError;
use olympics_core::models::{Measurement, Medal, RawEvent, RegionLookup, RegionRecord};
use tracing::{debug, info};

/// Columns the events file must provide, in the order `parse_event` reads them.
pub const EVENT_COLUMNS: [&str; 14] = [
    "Name", "Sex", "Age", "Height", "Weight", "Team", "NOC", "Games", "Year", "Season", "City",
    "Sport", "Event", "Medal",
];

/// Columns the region lookup must provide.
pub const REGION_COLUMNS: [&str; 3] = ["NOC", "region", "notes"];

// ── Formats ───────────────────────────────────────────────────────────────────

/// On-disk encoding of a tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Plain comma-separated text.
    Csv,
    /// Gzip-compressed CSV.
    GzipCsv,
}

impl DataFormat {
    /// Infer the format from the file extension.
    ///
    /// `.csv` is plain CSV, `.gz` / `.csv.gz` is gzip-compressed CSV. Any
    /// other extension is rejected rather than guessed.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if name.ends_with(".gz") {
            Ok(DataFormat::GzipCsv)
        } else if name.ends_with(".csv") {
            Ok(DataFormat::Csv)
        } else {
            Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                detail: "expected a .csv or .gz file".to_string(),
            })
        }
    }

    /// Resolve a declared format name (`auto`, `csv`, `gzip`).
    pub fn resolve(declared: &str, path: &Path) -> Result<Self, LoadError> {
        match declared {
            "auto" => Self::from_path(path),
            "csv" => Ok(DataFormat::Csv),
            "gzip" | "gz" => Ok(DataFormat::GzipCsv),
            other => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                detail: format!("unknown declared format '{}'", other),
            }),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Locations and formats of the two source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub events: PathBuf,
    pub events_format: DataFormat,
    pub regions: PathBuf,
}

impl DatasetPaths {
    /// Build paths with the events format inferred from its extension.
    pub fn new(events: impl Into<PathBuf>, regions: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let events = events.into();
        let events_format = DataFormat::from_path(&events)?;
        Ok(Self {
            events,
            events_format,
            regions: regions.into(),
        })
    }
}

/// Both source tables, exactly as read.
#[derive(Debug, Clone)]
pub struct RawDataset {
    pub events: Vec<RawEvent>,
    pub regions: RegionLookup,
}

/// Load both source tables.
pub fn load_dataset(paths: &DatasetPaths) -> Result<RawDataset, LoadError> {
    let events = load_events(&paths.events, paths.events_format)?;
    let regions = load_regions(&paths.regions)?;

    info!(
        "Loaded {} event records and {} NOC regions",
        events.len(),
        regions.len()
    );

    Ok(RawDataset { events, regions })
}

/// Load athlete event records from `path`, decoded according to `format`.
pub fn load_events(path: &Path, format: DataFormat) -> Result<Vec<RawEvent>, LoadError> {
    let mut reader = open_reader(path, format)?;
    let idx = column_indices(&mut reader, path, &EVENT_COLUMNS)?;

    let mut events = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record_line(&record, i);
        let event = parse_event(&record, &idx).map_err(|message| LoadError::Malformed {
            path: path.to_path_buf(),
            line,
            message,
        })?;
        events.push(event);
    }

    debug!("File {}: {} event records", path.display(), events.len());
    Ok(events)
}

/// Load the NOC → region lookup from a plain CSV file.
pub fn load_regions(path: &Path) -> Result<RegionLookup, LoadError> {
    if DataFormat::from_path(path)? != DataFormat::Csv {
        return Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            detail: "the region lookup must be plain CSV".to_string(),
        });
    }

    let mut reader = open_reader(path, DataFormat::Csv)?;
    let idx = column_indices(&mut reader, path, &REGION_COLUMNS)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let cell = |n: usize| record.get(idx[n]).unwrap_or("").trim();

        let noc = cell(0);
        if noc.is_empty() {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line: record_line(&record, i),
                message: "empty NOC code".to_string(),
            });
        }

        records.push(RegionRecord {
            noc: noc.to_string(),
            region: optional_text(cell(1)),
            notes: optional_text(cell(2)),
        });
    }

    debug!("File {}: {} region records", path.display(), records.len());
    Ok(RegionLookup::from_records(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_reader(
    path: &Path,
    format: DataFormat,
) -> Result<csv::Reader<Box<dyn Read>>, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let input: Box<dyn Read> = match format {
        DataFormat::Csv => Box::new(BufReader::new(file)),
        DataFormat::GzipCsv => Box::new(GzDecoder::new(BufReader::new(file))),
    };

    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input))
}

/// Position of each `required` column in the header row.
fn column_indices<R: Read>(
    reader: &mut csv::Reader<R>,
    path: &Path,
    required: &[&str],
) -> Result<Vec<usize>, LoadError> {
    let headers = reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    required
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim() == *column)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        })
        .collect()
}

/// 1-based line number of a record (the header is line 1).
fn record_line(record: &csv::StringRecord, index: usize) -> u64 {
    record
        .position()
        .map(|p| p.line())
        .unwrap_or(index as u64 + 2)
}

fn parse_event(record: &csv::StringRecord, idx: &[usize]) -> Result<RawEvent, String> {
    let cell = |n: usize| record.get(idx[n]).unwrap_or("").trim();

    Ok(RawEvent {
        name: cell(0).to_string(),
        sex: cell(1).parse()?,
        age: parse_optional_age(cell(2))?,
        height: parse_optional_measurement(cell(3), "Height")?,
        weight: parse_optional_measurement(cell(4), "Weight")?,
        team: cell(5).to_string(),
        noc: cell(6).to_string(),
        games: cell(7).to_string(),
        year: cell(8)
            .parse()
            .map_err(|_| format!("invalid Year '{}'", cell(8)))?,
        season: cell(9).parse()?,
        city: cell(10).to_string(),
        sport: cell(11).to_string(),
        event: cell(12).to_string(),
        medal: Medal::parse_cell(cell(13))?,
    })
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell == "NA"
}

fn optional_text(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Ages may be written as `24` or `24.0`.
fn parse_optional_age(cell: &str) -> Result<Option<u32>, String> {
    if is_missing(cell) {
        return Ok(None);
    }
    let value: f64 = cell
        .parse()
        .map_err(|_| format!("invalid Age '{}'", cell))?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(format!("invalid Age '{}'", cell));
    }
    Ok(Some(value as u32))
}

fn parse_optional_measurement(cell: &str, column: &str) -> Result<Option<Measurement>, String> {
    if is_missing(cell) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(Measurement(v))),
        _ => Err(format!("invalid {} '{}'", column, cell)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
