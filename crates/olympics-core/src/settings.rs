use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive analytics over 120 years of Summer Olympics results
#[derive(Parser, Debug, Clone)]
#[command(
    name = "olympics-dashboard",
    about = "Interactive analytics over 120 years of Summer Olympics results",
    version
)]
pub struct Settings {
    /// Athlete event records (CSV or gzip-compressed CSV)
    #[arg(long, default_value = "athlete_events.csv.gz")]
    pub events: PathBuf,

    /// NOC to region lookup (plain CSV)
    #[arg(long, default_value = "noc_regions.csv")]
    pub regions: PathBuf,

    /// Format of the events file; "auto" infers it from the extension
    #[arg(long, default_value = "auto", value_parser = ["auto", "csv", "gzip"])]
    pub events_format: String,

    /// Section shown first
    #[arg(long, default_value = "medal-tally", value_parser = ["medal-tally", "overall", "country", "athlete"])]
    pub view: String,

    /// Initial year selection
    #[arg(long, default_value = "Overall")]
    pub year: String,

    /// Initial country (region) selection
    #[arg(long, default_value = "Overall")]
    pub country: String,

    /// Initial sport selection
    #[arg(long, default_value = "Overall")]
    pub sport: String,

    /// Render in the terminal UI or print the selected view as JSON
    #[arg(long, default_value = "tui", value_parser = ["tui", "json"])]
    pub output: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// `tracing` filter directive for [`Settings::log_level`].
    ///
    /// `WARNING` maps to `warn` and `CRITICAL` to `error`; unknown names fall
    /// back to `info`.
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.to_uppercase().as_str() {
            "DEBUG" => "debug",
            "WARNING" | "WARN" => "warn",
            "ERROR" | "CRITICAL" => "error",
            _ => "info",
        }
    }

    /// `true` when the selected view should be printed instead of rendered.
    pub fn is_headless(&self) -> bool {
        self.output == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
