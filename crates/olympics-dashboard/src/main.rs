mod bootstrap;

use std::process::ExitCode;

use anyhow::Result;
use olympics_core::settings::Settings;
use olympics_core::DashboardError;
use olympics_data::loader::{DataFormat, DatasetPaths};
use olympics_runtime::dashboard::Section;
use olympics_runtime::data_manager::DataManager;
use olympics_ui::app::App;
use serde_json::json;

/// Exit status for a selection outside the dataset's domains.
const EXIT_BAD_SELECTION: u8 = 2;

fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    let logs_dir = bootstrap::ensure_directories()?;
    let destination =
        bootstrap::log_destination(settings.log_file.as_ref(), settings.is_headless(), &logs_dir);
    bootstrap::setup_logging(settings.log_filter(), destination.as_deref())?;

    tracing::info!("Olympics dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Output: {}, Theme: {}",
        settings.view,
        settings.output,
        settings.theme
    );

    let section: Section = settings.view.parse().map_err(anyhow::Error::msg)?;

    let manager = match dataset_paths(&settings).and_then(DataManager::load) {
        Ok(manager) => manager,
        Err(e) => {
            let err = DashboardError::from(e);
            tracing::error!("{}", err);
            eprintln!("{}", err.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    if settings.is_headless() {
        return match headless_report(&manager, section, &settings) {
            Ok(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                Ok(if e.is_bad_selection() {
                    ExitCode::from(EXIT_BAD_SELECTION)
                } else {
                    ExitCode::FAILURE
                })
            }
        };
    }

    let app = App::new(
        manager.dashboard(),
        manager.metadata().clone(),
        &settings.theme,
        section,
        settings.year.clone(),
        settings.country.clone(),
        settings.sport.clone(),
    );
    app.run()?;

    tracing::info!("Olympics dashboard exiting");
    Ok(ExitCode::SUCCESS)
}

/// Source file locations with the declared events format resolved.
fn dataset_paths(settings: &Settings) -> Result<DatasetPaths, olympics_core::LoadError> {
    let events_format = DataFormat::resolve(&settings.events_format, &settings.events)?;
    Ok(DatasetPaths {
        events: settings.events.clone(),
        events_format,
        regions: settings.regions.clone(),
    })
}

/// Every view of `section` for the configured selection, as one JSON document.
///
/// The first failing view aborts the report.
fn headless_report(
    manager: &DataManager,
    section: Section,
    settings: &Settings,
) -> Result<serde_json::Value, DashboardError> {
    let mut dashboard = manager.dashboard();
    let views = section
        .requests(&settings.year, &settings.country, &settings.sport)
        .iter()
        .map(|request| dashboard.query(request))
        .collect::<Result<Vec<_>, _>>()?;

    let report = json!({
        "section": section.title(),
        "selection": {
            "year": settings.year,
            "country": settings.country,
            "sport": settings.sport,
        },
        "metadata": manager.metadata(),
        "views": views,
    });
    Ok(report)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
