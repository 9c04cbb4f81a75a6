//! Shared fixtures for the data-layer tests.

use olympics_core::models::{Measurement, Medal, RawEvent, RegionLookup, RegionRecord, Season, Sex};

/// A Summer Games participation with plausible defaults for the fields a
/// test does not care about.
pub(crate) fn event(
    name: &str,
    noc: &str,
    year: i32,
    sport: &str,
    event: &str,
    medal: Option<Medal>,
) -> RawEvent {
    RawEvent {
        name: name.to_string(),
        sex: Sex::Male,
        age: Some(24),
        height: Some(Measurement(180.0)),
        weight: Some(Measurement(75.0)),
        team: noc.to_string(),
        noc: noc.to_string(),
        games: format!("{} Summer", year),
        year,
        season: Season::Summer,
        city: "Barcelona".to_string(),
        sport: sport.to_string(),
        event: event.to_string(),
        medal,
    }
}

/// FRA, ITA and USA map to a region; ROT has an entry without one.
/// Any other NOC (XXX, YYY, ...) is absent from the lookup.
pub(crate) fn regions() -> RegionLookup {
    let record = |noc: &str, region: Option<&str>, notes: Option<&str>| RegionRecord {
        noc: noc.to_string(),
        region: region.map(str::to_string),
        notes: notes.map(str::to_string),
    };
    RegionLookup::from_records(vec![
        record("FRA", Some("France"), None),
        record("ITA", Some("Italy"), None),
        record("USA", Some("USA"), None),
        record("ROT", None, Some("Refugee Olympic Team")),
    ])
}
