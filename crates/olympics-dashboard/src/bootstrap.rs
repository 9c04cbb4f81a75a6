use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file written under the logs directory while the TUI owns the terminal.
pub const DEFAULT_LOG_FILE: &str = "olympics-dashboard.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.olympics-dashboard/`, or `./.olympics-dashboard/` without a home.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".olympics-dashboard")
}

/// Ensure `~/.olympics-dashboard/logs/` exists and return it.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let logs = app_dir().join("logs");
    std::fs::create_dir_all(&logs)?;
    Ok(logs)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Where log output goes: `None` means stderr.
///
/// An explicit `--log-file` always wins. Otherwise headless runs log to
/// stderr and the TUI logs to a file so the screen is not overwritten.
pub fn log_destination(
    log_file: Option<&PathBuf>,
    headless: bool,
    logs_dir: &Path,
) -> Option<PathBuf> {
    match log_file {
        Some(path) => Some(path.clone()),
        None if headless => None,
        None => Some(logs_dir.join(DEFAULT_LOG_FILE)),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// `directive` is an [`EnvFilter`] directive such as `"info"`; an invalid one
/// falls back to `"info"`. File output is appended to and never coloured.
pub fn setup_logging(directive: &str, destination: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    match destination {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
