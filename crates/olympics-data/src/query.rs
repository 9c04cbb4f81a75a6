//! Validation of raw query parameters against the table's domains.
//!
//! Aggregation functions assume their parameters are domain members, so
//! every user-supplied year, country or sport passes through here first.

use olympics_core::models::{CanonicalTable, Selection, OVERALL};
use olympics_core::QueryParameterError;
use serde::Serialize;

use crate::aggregator::{country_year_list, sport_list};

/// The enumerable values of each query parameter, `Overall` first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryDomains {
    pub years: Vec<Selection<i32>>,
    pub countries: Vec<Selection<String>>,
    pub sports: Vec<Selection<String>>,
}

impl QueryDomains {
    pub fn from_table(table: &CanonicalTable) -> Self {
        let lists = country_year_list(table);
        Self {
            years: lists.years,
            countries: lists.countries,
            sports: sport_list(table),
        }
    }

    /// Parse a year parameter. `"Overall"` means no filter.
    pub fn parse_year(&self, raw: &str) -> Result<Selection<i32>, QueryParameterError> {
        let raw = raw.trim();
        if raw == OVERALL {
            return Ok(Selection::Overall);
        }
        let selection = raw
            .parse::<i32>()
            .map(Selection::Specific)
            .map_err(|_| QueryParameterError::UnknownYear(raw.to_string()))?;
        if self.years.contains(&selection) {
            Ok(selection)
        } else {
            Err(QueryParameterError::UnknownYear(raw.to_string()))
        }
    }

    /// Parse a country (region) parameter. `"Overall"` means no filter.
    pub fn parse_country(&self, raw: &str) -> Result<Selection<String>, QueryParameterError> {
        let raw = raw.trim();
        parse_member(&self.countries, raw)
            .ok_or_else(|| QueryParameterError::UnknownCountry(raw.to_string()))
    }

    /// Parse a sport parameter. `"Overall"` means no filter.
    pub fn parse_sport(&self, raw: &str) -> Result<Selection<String>, QueryParameterError> {
        let raw = raw.trim();
        parse_member(&self.sports, raw)
            .ok_or_else(|| QueryParameterError::UnknownSport(raw.to_string()))
    }

    /// Number of distinct specific years.
    pub fn year_count(&self) -> usize {
        self.years.len().saturating_sub(1)
    }
}

/// Unwrap a country selection for views that need one region.
pub fn require_country(selection: &Selection<String>) -> Result<&str, QueryParameterError> {
    selection
        .specific()
        .map(String::as_str)
        .ok_or(QueryParameterError::OverallNotAllowed("country"))
}

/// Look up a trimmed value in `domain`.
fn parse_member(domain: &[Selection<String>], raw: &str) -> Option<Selection<String>> {
    let raw = raw.trim();
    if raw == OVERALL {
        return Some(Selection::Overall);
    }
    domain
        .iter()
        .find(|s| s.specific().map(String::as_str) == Some(raw))
        .cloned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
