//! Query front-end for the presentation layer.
//!
//! The UI and the headless printer never touch the canonical table directly.
//! They describe what they want as a [`ViewRequest`] with raw string
//! parameters; [`Dashboard::query`] validates those against the table's
//! domains, dispatches to the matching aggregation and memoises the result.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use olympics_core::models::{CanonicalTable, Selection};
use olympics_core::{DashboardError, QueryParameterError};
use olympics_data::aggregator::{
    self, AgeDistribution, AthleteProfile, AthleteRank, CountryAthleteRank, CountryYearList,
    Dimension, Heatmap, MedalTally, OverallStats, SexSplit, SportAges, TimePoint, YearCount,
    FAMOUS_SPORTS,
};
use olympics_data::query::{require_country, QueryDomains};
use serde::Serialize;
use tracing::debug;

// ── Sections ──────────────────────────────────────────────────────────────────

/// A page of the dashboard, grouping the views shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    MedalTally,
    Overall,
    Country,
    Athlete,
}

impl Section {
    /// All sections in menu order.
    pub const ALL: [Section; 4] = [
        Section::MedalTally,
        Section::Overall,
        Section::Country,
        Section::Athlete,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::MedalTally => "Medal Tally",
            Section::Overall => "Overall Analysis",
            Section::Country => "Country-wise Analysis",
            Section::Athlete => "Athlete-wise Analysis",
        }
    }

    /// Following section, wrapping around.
    pub fn next(&self) -> Section {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Views rendered by this section for the given raw parameters.
    pub fn requests(&self, year: &str, country: &str, sport: &str) -> Vec<ViewRequest> {
        match self {
            Section::MedalTally => vec![ViewRequest::MedalTally {
                year: year.to_string(),
                country: country.to_string(),
            }],
            Section::Overall => vec![
                ViewRequest::OverallStatistics,
                ViewRequest::DataOverTime(Dimension::Region),
                ViewRequest::DataOverTime(Dimension::Event),
                ViewRequest::DataOverTime(Dimension::Athlete),
                ViewRequest::EventsHeatmap,
                ViewRequest::MostSuccessful {
                    sport: sport.to_string(),
                },
            ],
            Section::Country => vec![
                ViewRequest::YearwiseMedalTally {
                    country: country.to_string(),
                },
                ViewRequest::CountryEventHeatmap {
                    country: country.to_string(),
                },
                ViewRequest::MostSuccessfulCountrywise {
                    country: country.to_string(),
                },
            ],
            Section::Athlete => vec![
                ViewRequest::AgeDistribution,
                ViewRequest::GoldMedalistAges,
                ViewRequest::WeightVHeight {
                    sport: sport.to_string(),
                },
                ViewRequest::MenVsWomen,
            ],
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medal-tally" => Ok(Section::MedalTally),
            "overall" => Ok(Section::Overall),
            "country" => Ok(Section::Country),
            "athlete" => Ok(Section::Athlete),
            other => Err(format!("unknown view '{}'", other)),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ── Requests and results ──────────────────────────────────────────────────────

/// One reporting view with unvalidated parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewRequest {
    MedalTally { year: String, country: String },
    NocMedalTally,
    CountryYearList,
    SportList,
    DataOverTime(Dimension),
    OverallStatistics,
    EventsHeatmap,
    MostSuccessful { sport: String },
    YearwiseMedalTally { country: String },
    CountryEventHeatmap { country: String },
    MostSuccessfulCountrywise { country: String },
    WeightVHeight { sport: String },
    MenVsWomen,
    AgeDistribution,
    GoldMedalistAges,
}

/// Output of one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum ViewResult {
    MedalTally(MedalTally),
    CountryYearList(CountryYearList),
    SportList(Vec<Selection<String>>),
    TimeSeries {
        dimension: Dimension,
        points: Vec<TimePoint>,
    },
    OverallStatistics(OverallStats),
    Heatmap(Heatmap),
    AthleteRanking(Vec<AthleteRank>),
    YearwiseMedals(Vec<YearCount>),
    CountryAthleteRanking(Vec<CountryAthleteRank>),
    AthleteProfiles(Vec<AthleteProfile>),
    MenVsWomen(Vec<SexSplit>),
    AgeDistribution(AgeDistribution),
    GoldMedalistAges(Vec<SportAges>),
}

impl ViewResult {
    /// `true` when the selection matched nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            ViewResult::MedalTally(t) => t.rows.is_empty(),
            ViewResult::CountryYearList(l) => l.years.len() <= 1 && l.countries.len() <= 1,
            ViewResult::SportList(s) => s.len() <= 1,
            ViewResult::TimeSeries { points, .. } => points.is_empty(),
            ViewResult::OverallStatistics(s) => s.athletes == 0,
            ViewResult::Heatmap(h) => h.is_empty(),
            ViewResult::AthleteRanking(r) => r.is_empty(),
            ViewResult::YearwiseMedals(y) => y.is_empty(),
            ViewResult::CountryAthleteRanking(r) => r.is_empty(),
            ViewResult::AthleteProfiles(p) => p.is_empty(),
            ViewResult::MenVsWomen(m) => m.is_empty(),
            ViewResult::AgeDistribution(a) => a.overall.is_empty(),
            ViewResult::GoldMedalistAges(g) => g.iter().all(|s| s.ages.is_empty()),
        }
    }
}

/// A request whose parameters are known domain members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Query {
    MedalTally(Selection<i32>, Selection<String>),
    NocMedalTally,
    CountryYearList,
    SportList,
    DataOverTime(Dimension),
    OverallStatistics,
    EventsHeatmap,
    MostSuccessful(Selection<String>),
    YearwiseMedalTally(String),
    CountryEventHeatmap(String),
    MostSuccessfulCountrywise(String),
    WeightVHeight(Selection<String>),
    MenVsWomen,
    AgeDistribution,
    GoldMedalistAges,
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

/// Validating, memoising front-end over the aggregation library.
///
/// Holds a shared handle to the canonical table; results are cloned out of
/// the cache so callers can never alias another query's output.
#[derive(Debug)]
pub struct Dashboard {
    table: CanonicalTable,
    domains: QueryDomains,
    cache: HashMap<Query, ViewResult>,
    caching: bool,
    cache_hits: u64,
}

impl Dashboard {
    pub fn new(table: CanonicalTable, domains: QueryDomains) -> Self {
        Self {
            table,
            domains,
            cache: HashMap::new(),
            caching: true,
            cache_hits: 0,
        }
    }

    /// Disable or re-enable memoisation. Disabling also clears the cache.
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.caching = enabled;
        if !enabled {
            self.cache.clear();
        }
        self
    }

    pub fn domains(&self) -> &QueryDomains {
        &self.domains
    }

    /// Validate `request` and return its result.
    ///
    /// Parameters outside the domains are rejected with
    /// [`DashboardError::Query`] before any aggregation runs. An empty
    /// result is not an error.
    pub fn query(&mut self, request: &ViewRequest) -> Result<ViewResult, DashboardError> {
        let query = self.validate(request)?;

        if let Some(cached) = self.cache.get(&query) {
            self.cache_hits += 1;
            debug!("Cache hit for {:?}", query);
            return Ok(cached.clone());
        }

        let result = self.run(&query);
        if self.caching {
            self.cache.insert(query, result.clone());
        }
        Ok(result)
    }

    /// Number of queries answered from the cache.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Number of memoised results.
    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    pub fn invalidate_cache(&mut self) {
        self.cache.clear();
        debug!("Dashboard cache invalidated");
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn validate(&self, request: &ViewRequest) -> Result<Query, QueryParameterError> {
        let d = &self.domains;
        let query = match request {
            ViewRequest::MedalTally { year, country } => {
                Query::MedalTally(d.parse_year(year)?, d.parse_country(country)?)
            }
            ViewRequest::NocMedalTally => Query::NocMedalTally,
            ViewRequest::CountryYearList => Query::CountryYearList,
            ViewRequest::SportList => Query::SportList,
            ViewRequest::DataOverTime(dimension) => Query::DataOverTime(*dimension),
            ViewRequest::OverallStatistics => Query::OverallStatistics,
            ViewRequest::EventsHeatmap => Query::EventsHeatmap,
            ViewRequest::MostSuccessful { sport } => Query::MostSuccessful(d.parse_sport(sport)?),
            ViewRequest::YearwiseMedalTally { country } => {
                Query::YearwiseMedalTally(self.single_country(country)?)
            }
            ViewRequest::CountryEventHeatmap { country } => {
                Query::CountryEventHeatmap(self.single_country(country)?)
            }
            ViewRequest::MostSuccessfulCountrywise { country } => {
                Query::MostSuccessfulCountrywise(self.single_country(country)?)
            }
            ViewRequest::WeightVHeight { sport } => Query::WeightVHeight(d.parse_sport(sport)?),
            ViewRequest::MenVsWomen => Query::MenVsWomen,
            ViewRequest::AgeDistribution => Query::AgeDistribution,
            ViewRequest::GoldMedalistAges => Query::GoldMedalistAges,
        };
        Ok(query)
    }

    fn single_country(&self, raw: &str) -> Result<String, QueryParameterError> {
        let selection = self.domains.parse_country(raw)?;
        require_country(&selection).map(str::to_string)
    }

    fn run(&self, query: &Query) -> ViewResult {
        let t = &self.table;
        match query {
            Query::MedalTally(year, country) => {
                ViewResult::MedalTally(aggregator::fetch_medal_tally(t, year, country))
            }
            Query::NocMedalTally => ViewResult::MedalTally(aggregator::noc_medal_tally(t)),
            Query::CountryYearList => {
                ViewResult::CountryYearList(aggregator::country_year_list(t))
            }
            Query::SportList => ViewResult::SportList(aggregator::sport_list(t)),
            Query::DataOverTime(dimension) => ViewResult::TimeSeries {
                dimension: *dimension,
                points: aggregator::data_over_time(t, *dimension),
            },
            Query::OverallStatistics => {
                ViewResult::OverallStatistics(aggregator::overall_statistics(t))
            }
            Query::EventsHeatmap => ViewResult::Heatmap(aggregator::events_heatmap(t)),
            Query::MostSuccessful(sport) => {
                ViewResult::AthleteRanking(aggregator::most_successful(t, sport))
            }
            Query::YearwiseMedalTally(country) => {
                ViewResult::YearwiseMedals(aggregator::yearwise_medal_tally(t, country))
            }
            Query::CountryEventHeatmap(country) => {
                ViewResult::Heatmap(aggregator::country_event_heatmap(t, country))
            }
            Query::MostSuccessfulCountrywise(country) => ViewResult::CountryAthleteRanking(
                aggregator::most_successful_countrywise(t, country),
            ),
            Query::WeightVHeight(sport) => {
                ViewResult::AthleteProfiles(aggregator::weight_v_height(t, sport))
            }
            Query::MenVsWomen => ViewResult::MenVsWomen(aggregator::men_vs_women(t)),
            Query::AgeDistribution => {
                ViewResult::AgeDistribution(aggregator::age_distribution(t))
            }
            Query::GoldMedalistAges => ViewResult::GoldMedalistAges(
                aggregator::gold_medalist_ages_by_sport(t, &FAMOUS_SPORTS),
            ),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
