//! Reporting views over the canonical table.
//!
//! Every function here is pure: it borrows the [`CanonicalTable`] read-only
//! and returns a freshly built result. A filter combination that matches
//! nothing yields an empty result, never an error.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use olympics_core::models::{
    CanonicalRow, CanonicalTable, Measurement, Medal, MedalIndicators, MedalOutcome, Selection,
    Sex,
};
use serde::Serialize;

/// Number of athletes in the overall "most successful" ranking.
pub const TOP_ATHLETES_OVERALL: usize = 15;

/// Number of athletes in the per-country ranking.
pub const TOP_ATHLETES_COUNTRY: usize = 10;

/// Year of the 1906 Intercalated Games, which are not counted as an edition.
pub const INTERCALATED_GAMES_YEAR: i32 = 1906;

/// Sports shown in the gold-medallist age comparison.
pub const FAMOUS_SPORTS: [&str; 38] = [
    "Basketball",
    "Judo",
    "Football",
    "Tug-Of-War",
    "Athletics",
    "Swimming",
    "Badminton",
    "Sailing",
    "Gymnastics",
    "Art Competitions",
    "Handball",
    "Weightlifting",
    "Wrestling",
    "Water Polo",
    "Hockey",
    "Rowing",
    "Fencing",
    "Shooting",
    "Boxing",
    "Taekwondo",
    "Cycling",
    "Diving",
    "Canoeing",
    "Tennis",
    "Golf",
    "Softball",
    "Archery",
    "Volleyball",
    "Synchronized Swimming",
    "Table Tennis",
    "Baseball",
    "Rhythmic Gymnastics",
    "Rugby Sevens",
    "Beach Volleyball",
    "Triathlon",
    "Rugby",
    "Polo",
    "Ice Hockey",
];

// ── Result types ──────────────────────────────────────────────────────────────

/// What a medal tally is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TallyGrouping {
    Region,
    Year,
    Noc,
}

/// Group key of one tally row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum TallyKey {
    Region(String),
    Year(i32),
    Noc(String),
}

impl fmt::Display for TallyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TallyKey::Region(r) | TallyKey::Noc(r) => f.write_str(r),
            TallyKey::Year(y) => write!(f, "{}", y),
        }
    }
}

/// Medal totals for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyRow {
    pub key: TallyKey,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

/// A medal table sorted by gold, then total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedalTally {
    pub grouping: TallyGrouping,
    pub rows: Vec<TallyRow>,
}

/// Selectable year and country values, each led by `Overall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryYearList {
    pub years: Vec<Selection<i32>>,
    pub countries: Vec<Selection<String>>,
}

/// Column counted per edition by [`data_over_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    Region,
    Event,
    Athlete,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Region => "Nations",
            Dimension::Event => "Events",
            Dimension::Athlete => "Athletes",
        }
    }

    fn value<'a>(&self, row: &'a CanonicalRow) -> Option<&'a str> {
        match self {
            Dimension::Region => row.region(),
            Dimension::Event => Some(&row.record.event),
            Dimension::Athlete => Some(&row.record.name),
        }
    }
}

/// One point of a per-edition series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimePoint {
    pub edition: i32,
    pub count: u32,
}

/// Medal count of a country in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub medals: u32,
}

/// An athlete in the overall ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteRank {
    pub name: String,
    pub medals: u32,
    pub sport: String,
    pub region: Option<String>,
}

/// An athlete in a single country's ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryAthleteRank {
    pub name: String,
    pub medals: u32,
    pub sport: String,
}

/// Row-by-column count matrix (sport × year); absent cells are 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub rows: Vec<String>,
    pub columns: Vec<i32>,
    pub cells: Vec<Vec<u32>>,
}

impl Heatmap {
    fn from_counts(counts: BTreeMap<(String, i32), u32>) -> Self {
        let rows: Vec<String> = counts
            .keys()
            .map(|(r, _)| r.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let columns: Vec<i32> = counts
            .keys()
            .map(|(_, c)| *c)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let row_pos: HashMap<&str, usize> =
            rows.iter().enumerate().map(|(i, r)| (r.as_str(), i)).collect();
        let col_pos: HashMap<i32, usize> =
            columns.iter().enumerate().map(|(i, c)| (*c, i)).collect();

        let mut cells = vec![vec![0u32; columns.len()]; rows.len()];
        for ((row, col), count) in &counts {
            cells[row_pos[row.as_str()]][col_pos[col]] = *count;
        }

        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value, `None` when the row or column is not part of the matrix.
    pub fn get(&self, row: &str, column: i32) -> Option<u32> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| *x == column)?;
        Some(self.cells[r][c])
    }

    pub fn max_value(&self) -> u32 {
        self.cells
            .iter()
            .flat_map(|r| r.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// One representative record of an athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteProfile {
    pub name: String,
    pub sex: Sex,
    pub age: Option<u32>,
    pub height: Option<Measurement>,
    pub weight: Option<Measurement>,
    pub region: Option<String>,
    pub sport: String,
    pub year: i32,
    pub medal: MedalOutcome,
}

/// Distinct athletes per edition, split by sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SexSplit {
    pub year: i32,
    pub male: u32,
    pub female: u32,
}

/// Headline counts of the "Overall Analysis" section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverallStats {
    pub editions: usize,
    pub hosts: usize,
    pub sports: usize,
    pub events: usize,
    pub athletes: usize,
    pub nations: usize,
}

/// Athlete ages, overall and per medal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgeDistribution {
    pub overall: Vec<u32>,
    pub gold: Vec<u32>,
    pub silver: Vec<u32>,
    pub bronze: Vec<u32>,
}

/// Count of ages falling in `[start, start + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBin {
    pub start: u32,
    pub count: u32,
}

impl AgeDistribution {
    /// Bucket sorted or unsorted `ages` into bins of `width` years.
    pub fn histogram(ages: &[u32], width: u32) -> Vec<AgeBin> {
        let width = width.max(1);
        let mut bins: BTreeMap<u32, u32> = BTreeMap::new();
        for age in ages {
            *bins.entry(age / width * width).or_default() += 1;
        }
        bins.into_iter()
            .map(|(start, count)| AgeBin { start, count })
            .collect()
    }
}

/// Ages of gold medallists in one sport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SportAges {
    pub sport: String,
    pub ages: Vec<u32>,
}

// ── Internal helpers ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct MedalCounts {
    gold: u32,
    silver: u32,
    bronze: u32,
}

impl MedalCounts {
    fn add(&mut self, medals: &MedalIndicators) {
        self.gold += u32::from(medals.gold);
        self.silver += u32::from(medals.silver);
        self.bronze += u32::from(medals.bronze);
    }

    fn into_row(self, key: TallyKey) -> TallyRow {
        TallyRow {
            key,
            gold: self.gold,
            silver: self.silver,
            bronze: self.bronze,
            total: self.gold + self.silver + self.bronze,
        }
    }
}

/// Natural key of a medal. A team medal appears once per athlete in the
/// source but is counted once per event.
#[derive(PartialEq, Eq, Hash)]
struct MedalKey<'a> {
    team: &'a str,
    noc: &'a str,
    games: &'a str,
    year: i32,
    city: &'a str,
    sport: &'a str,
    event: &'a str,
    medal: Option<Medal>,
}

impl<'a> MedalKey<'a> {
    fn of(row: &'a CanonicalRow) -> Self {
        let r = &row.record;
        Self {
            team: &r.team,
            noc: &r.noc,
            games: &r.games,
            year: r.year,
            city: &r.city,
            sport: &r.sport,
            event: &r.event,
            medal: r.medal,
        }
    }
}

/// Keep the first row per natural medal key.
fn dedup_medal_events<'a>(
    rows: impl Iterator<Item = &'a CanonicalRow>,
) -> impl Iterator<Item = &'a CanonicalRow> {
    let mut seen: HashSet<MedalKey<'a>> = HashSet::new();
    rows.filter(move |row| seen.insert(MedalKey::of(*row)))
}

/// Medal-winning rows, deduplicated on the natural key.
fn team_medals(table: &CanonicalTable) -> impl Iterator<Item = &CanonicalRow> {
    dedup_medal_events(table.iter().filter(|r| r.medal().is_some()))
}

/// Keep the first row per (athlete name, region) pair.
fn athlete_rows(table: &CanonicalTable) -> Vec<&CanonicalRow> {
    let mut seen: HashSet<(&str, Option<&str>)> = HashSet::new();
    table
        .iter()
        .filter(|row| seen.insert((row.name(), row.region())))
        .collect()
}

fn region_matches(selection: &Selection<String>, region: Option<&str>) -> bool {
    match selection {
        Selection::Overall => true,
        Selection::Specific(c) => region == Some(c.as_str()),
    }
}

/// Sort by gold descending, then total descending; equal rows keep key order.
fn sort_tally(rows: &mut [TallyRow]) {
    rows.sort_by(|a, b| b.gold.cmp(&a.gold).then(b.total.cmp(&a.total)));
}

/// Medal count per athlete name, highest first, ties in encounter order.
fn rank_by_medals<'a>(
    rows: impl Iterator<Item = &'a CanonicalRow>,
    limit: usize,
) -> Vec<(&'a str, u32)> {
    let mut order: Vec<(&'a str, u32)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for row in rows {
        match index.get(row.name()) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(row.name(), order.len());
                order.push((row.name(), 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(limit);
    order
}

/// First row of the whole table for each wanted athlete name.
fn first_rows_by_name<'a>(
    table: &'a CanonicalTable,
    names: &[(&str, u32)],
) -> HashMap<&'a str, &'a CanonicalRow> {
    let wanted: HashSet<&str> = names.iter().map(|(n, _)| *n).collect();
    let mut first = HashMap::with_capacity(wanted.len());
    for row in table.iter() {
        if wanted.contains(row.name()) {
            first.entry(row.name()).or_insert(row);
        }
    }
    first
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.collect::<HashSet<_>>().len()
}

// ── Medal tallies ─────────────────────────────────────────────────────────────

/// Medal table for a year / country selection.
///
/// | year     | country  | grouped by |
/// |----------|----------|------------|
/// | Overall  | Overall  | region     |
/// | Overall  | specific | year       |
/// | specific | Overall  | region     |
/// | specific | specific | region     |
///
/// Rows without a region are left out of region groupings.
pub fn fetch_medal_tally(
    table: &CanonicalTable,
    year: &Selection<i32>,
    country: &Selection<String>,
) -> MedalTally {
    let grouping = match (year, country) {
        (Selection::Overall, Selection::Specific(_)) => TallyGrouping::Year,
        _ => TallyGrouping::Region,
    };

    let mut groups: BTreeMap<TallyKey, MedalCounts> = BTreeMap::new();
    let selected = dedup_medal_events(table.iter())
        .filter(|r| year.matches(&r.year()) && region_matches(country, r.region()));

    for row in selected {
        let key = match grouping {
            TallyGrouping::Year => TallyKey::Year(row.year()),
            _ => match row.region() {
                Some(region) => TallyKey::Region(region.to_string()),
                None => continue,
            },
        };
        groups.entry(key).or_default().add(&row.medals);
    }

    let mut rows: Vec<TallyRow> = groups
        .into_iter()
        .map(|(key, counts)| counts.into_row(key))
        .collect();
    sort_tally(&mut rows);

    MedalTally { grouping, rows }
}

/// All-time medal table grouped by NOC code.
pub fn noc_medal_tally(table: &CanonicalTable) -> MedalTally {
    let mut groups: BTreeMap<TallyKey, MedalCounts> = BTreeMap::new();
    for row in dedup_medal_events(table.iter()) {
        groups
            .entry(TallyKey::Noc(row.record.noc.clone()))
            .or_default()
            .add(&row.medals);
    }

    let mut rows: Vec<TallyRow> = groups
        .into_iter()
        .map(|(key, counts)| counts.into_row(key))
        .collect();
    sort_tally(&mut rows);

    MedalTally {
        grouping: TallyGrouping::Noc,
        rows,
    }
}

// ── Selection domains ─────────────────────────────────────────────────────────

/// Sorted distinct years and regions, each with `Overall` first.
pub fn country_year_list(table: &CanonicalTable) -> CountryYearList {
    let years: BTreeSet<i32> = table.iter().map(|r| r.year()).collect();
    let countries: BTreeSet<&str> = table.iter().filter_map(|r| r.region()).collect();

    CountryYearList {
        years: std::iter::once(Selection::Overall)
            .chain(years.into_iter().map(Selection::Specific))
            .collect(),
        countries: std::iter::once(Selection::Overall)
            .chain(
                countries
                    .into_iter()
                    .map(|c| Selection::Specific(c.to_string())),
            )
            .collect(),
    }
}

/// Sorted distinct sports with `Overall` first.
pub fn sport_list(table: &CanonicalTable) -> Vec<Selection<String>> {
    let sports: BTreeSet<&str> = table.iter().map(|r| r.sport()).collect();
    std::iter::once(Selection::Overall)
        .chain(sports.into_iter().map(|s| Selection::Specific(s.to_string())))
        .collect()
}

// ── Overall analysis ──────────────────────────────────────────────────────────

/// Distinct `dimension` values per edition, one point per year, ascending.
///
/// Missing regions are not counted; a year whose rows all lack the value
/// still appears with a count of zero.
pub fn data_over_time(table: &CanonicalTable, dimension: Dimension) -> Vec<TimePoint> {
    let mut per_year: BTreeMap<i32, HashSet<&str>> = BTreeMap::new();
    for row in table.iter() {
        let values = per_year.entry(row.year()).or_default();
        if let Some(v) = dimension.value(row) {
            values.insert(v);
        }
    }

    per_year
        .into_iter()
        .map(|(edition, values)| TimePoint {
            edition,
            count: values.len() as u32,
        })
        .collect()
}

/// Headline counts for the whole table.
pub fn overall_statistics(table: &CanonicalTable) -> OverallStats {
    let years: HashSet<i32> = table
        .iter()
        .map(|r| r.year())
        .filter(|y| *y != INTERCALATED_GAMES_YEAR)
        .collect();

    OverallStats {
        editions: years.len(),
        hosts: distinct(table.iter().map(|r| r.record.city.as_str())),
        sports: distinct(table.iter().map(|r| r.sport())),
        events: distinct(table.iter().map(|r| r.record.event.as_str())),
        athletes: distinct(table.iter().map(|r| r.name())),
        nations: distinct(table.iter().filter_map(|r| r.region())),
    }
}

/// Distinct events per sport and year.
pub fn events_heatmap(table: &CanonicalTable) -> Heatmap {
    let mut seen: HashSet<(i32, &str, &str)> = HashSet::new();
    let mut counts: BTreeMap<(String, i32), u32> = BTreeMap::new();
    for row in table.iter() {
        if seen.insert((row.year(), row.sport(), row.record.event.as_str())) {
            *counts
                .entry((row.sport().to_string(), row.year()))
                .or_default() += 1;
        }
    }
    Heatmap::from_counts(counts)
}

/// The athletes with the most medals, optionally within one sport.
///
/// Sport and region come from the athlete's first row in the table; an
/// athlete who competed in several sports is shown once, with that first
/// match.
pub fn most_successful(table: &CanonicalTable, sport: &Selection<String>) -> Vec<AthleteRank> {
    let ranked = rank_by_medals(
        table
            .iter()
            .filter(|r| r.medal().is_some() && sport.matches(r.sport())),
        TOP_ATHLETES_OVERALL,
    );
    let first = first_rows_by_name(table, &ranked);

    ranked
        .into_iter()
        .filter_map(|(name, medals)| {
            first.get(name).map(|row| AthleteRank {
                name: name.to_string(),
                medals,
                sport: row.sport().to_string(),
                region: row.region.clone(),
            })
        })
        .collect()
}

// ── Country-wise analysis ─────────────────────────────────────────────────────

/// Medals won by `country` per year, ascending.
pub fn yearwise_medal_tally(table: &CanonicalTable, country: &str) -> Vec<YearCount> {
    let mut per_year: BTreeMap<i32, u32> = BTreeMap::new();
    for row in team_medals(table).filter(|r| r.region() == Some(country)) {
        *per_year.entry(row.year()).or_default() += 1;
    }

    per_year
        .into_iter()
        .map(|(year, medals)| YearCount { year, medals })
        .collect()
}

/// Medals won by `country` per sport and year.
pub fn country_event_heatmap(table: &CanonicalTable, country: &str) -> Heatmap {
    let mut counts: BTreeMap<(String, i32), u32> = BTreeMap::new();
    for row in team_medals(table).filter(|r| r.region() == Some(country)) {
        *counts
            .entry((row.sport().to_string(), row.year()))
            .or_default() += 1;
    }
    Heatmap::from_counts(counts)
}

/// The athletes of `country` with the most medals.
pub fn most_successful_countrywise(
    table: &CanonicalTable,
    country: &str,
) -> Vec<CountryAthleteRank> {
    let ranked = rank_by_medals(
        table
            .iter()
            .filter(|r| r.medal().is_some() && r.region() == Some(country)),
        TOP_ATHLETES_COUNTRY,
    );
    let first = first_rows_by_name(table, &ranked);

    ranked
        .into_iter()
        .filter_map(|(name, medals)| {
            first.get(name).map(|row| CountryAthleteRank {
                name: name.to_string(),
                medals,
                sport: row.sport().to_string(),
            })
        })
        .collect()
}

// ── Athlete-wise analysis ─────────────────────────────────────────────────────

/// One record per athlete, optionally restricted to a sport.
pub fn weight_v_height(table: &CanonicalTable, sport: &Selection<String>) -> Vec<AthleteProfile> {
    athlete_rows(table)
        .into_iter()
        .filter(|r| sport.matches(r.sport()))
        .map(|r| AthleteProfile {
            name: r.record.name.clone(),
            sex: r.record.sex,
            age: r.record.age,
            height: r.record.height,
            weight: r.record.weight,
            region: r.region.clone(),
            sport: r.record.sport.clone(),
            year: r.record.year,
            medal: MedalOutcome::from(r.medal()),
        })
        .collect()
}

/// Male and female athlete counts per edition.
///
/// A year with athletes of only one sex reports 0 for the other.
pub fn men_vs_women(table: &CanonicalTable) -> Vec<SexSplit> {
    let mut per_year: BTreeMap<i32, (u32, u32)> = BTreeMap::new();
    for row in athlete_rows(table) {
        let counts = per_year.entry(row.year()).or_default();
        match row.record.sex {
            Sex::Male => counts.0 += 1,
            Sex::Female => counts.1 += 1,
        }
    }

    per_year
        .into_iter()
        .map(|(year, (male, female))| SexSplit { year, male, female })
        .collect()
}

/// Ages of one record per athlete, overall and by medal, sorted ascending.
pub fn age_distribution(table: &CanonicalTable) -> AgeDistribution {
    let mut dist = AgeDistribution::default();
    for row in athlete_rows(table) {
        let Some(age) = row.record.age else {
            continue;
        };
        dist.overall.push(age);
        match row.medal() {
            Some(Medal::Gold) => dist.gold.push(age),
            Some(Medal::Silver) => dist.silver.push(age),
            Some(Medal::Bronze) => dist.bronze.push(age),
            None => {}
        }
    }
    for ages in [
        &mut dist.overall,
        &mut dist.gold,
        &mut dist.silver,
        &mut dist.bronze,
    ] {
        ages.sort_unstable();
    }
    dist
}

/// Ages of gold medallists for each of `sports`, in the given order.
pub fn gold_medalist_ages_by_sport(table: &CanonicalTable, sports: &[&str]) -> Vec<SportAges> {
    let athletes = athlete_rows(table);
    sports
        .iter()
        .map(|sport| {
            let mut ages: Vec<u32> = athletes
                .iter()
                .filter(|r| r.sport() == *sport && r.medal() == Some(Medal::Gold))
                .filter_map(|r| r.record.age)
                .collect();
            ages.sort_unstable();
            SportAges {
                sport: sport.to_string(),
                ages,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessor::preprocess;
    use crate::test_support::{event, regions};
    use olympics_core::models::RawEvent;

    fn table(events: Vec<RawEvent>) -> CanonicalTable {
        preprocess(&events, &regions())
    }

    fn specific(s: &str) -> Selection<String> {
        Selection::Specific(s.to_string())
    }

    fn region_key(s: &str) -> TallyKey {
        TallyKey::Region(s.to_string())
    }

    /// A relay gold won by a four-person team plus individual medals.
    fn relay_table() -> CanonicalTable {
        let mut events = Vec::new();
        for name in ["R1", "R2", "R3", "R4"] {
            let mut e = event(name, "USA", 2000, "Swimming", "4x100 Relay", Some(Medal::Gold));
            e.team = "United States".to_string();
            events.push(e);
        }
        events.push(event("F1", "FRA", 2000, "Judo", "Judo Men's", Some(Medal::Gold)));
        events.push(event("F2", "FRA", 2004, "Judo", "Judo Men's", Some(Medal::Silver)));
        events.push(event("I1", "ITA", 2000, "Fencing", "Foil", Some(Medal::Bronze)));
        events.push(event("N1", "ITA", 2000, "Fencing", "Epee", None));
        table(events)
    }

    // ── fetch_medal_tally ─────────────────────────────────────────────────────

    #[test]
    fn test_tally_example_two_regions() {
        let t = table(vec![
            event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("B", "ITA", 1992, "Judo", "Judo Women's", Some(Medal::Silver)),
        ]);
        let tally = fetch_medal_tally(&t, &Selection::Specific(1992), &Selection::Overall);

        assert_eq!(tally.grouping, TallyGrouping::Region);
        assert_eq!(
            tally.rows,
            vec![
                TallyRow {
                    key: region_key("France"),
                    gold: 1,
                    silver: 0,
                    bronze: 0,
                    total: 1,
                },
                TallyRow {
                    key: region_key("Italy"),
                    gold: 0,
                    silver: 1,
                    bronze: 0,
                    total: 1,
                },
            ]
        );
    }

    #[test]
    fn test_tally_counts_team_medal_once() {
        let tally = fetch_medal_tally(&relay_table(), &Selection::Overall, &Selection::Overall);
        let usa = tally.rows.iter().find(|r| r.key == region_key("USA")).unwrap();
        assert_eq!(usa.gold, 1);
        assert_eq!(usa.total, 1);
    }

    #[test]
    fn test_tally_sorted_by_gold_then_total() {
        let tally = fetch_medal_tally(&relay_table(), &Selection::Overall, &Selection::Overall);
        let keys: Vec<String> = tally.rows.iter().map(|r| r.key.to_string()).collect();
        // France and USA both have one gold; France has the higher total.
        assert_eq!(keys, vec!["France", "USA", "Italy"]);
    }

    #[test]
    fn test_tally_overall_year_specific_country_groups_by_year() {
        let tally = fetch_medal_tally(&relay_table(), &Selection::Overall, &specific("France"));
        assert_eq!(tally.grouping, TallyGrouping::Year);
        let keys: Vec<TallyKey> = tally.rows.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, vec![TallyKey::Year(2000), TallyKey::Year(2004)]);
    }

    #[test]
    fn test_tally_specific_year_and_country_single_row() {
        let tally = fetch_medal_tally(
            &relay_table(),
            &Selection::Specific(2000),
            &specific("France"),
        );
        assert_eq!(tally.grouping, TallyGrouping::Region);
        assert_eq!(tally.rows.len(), 1);
        assert_eq!(tally.rows[0].gold, 1);
        assert_eq!(tally.rows[0].silver, 0);
    }

    #[test]
    fn test_tally_includes_regions_without_medals() {
        let t = table(vec![
            event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("B", "ITA", 1992, "Judo", "Judo Men's", None),
        ]);
        let tally = fetch_medal_tally(&t, &Selection::Overall, &Selection::Overall);
        assert_eq!(tally.rows.len(), 2);
        assert_eq!(tally.rows[1].key, region_key("Italy"));
        assert_eq!(tally.rows[1].total, 0);
    }

    #[test]
    fn test_tally_skips_missing_region() {
        let t = table(vec![
            event("A", "XXX", 1992, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("B", "ITA", 1992, "Judo", "Judo Men's", Some(Medal::Bronze)),
        ]);
        let tally = fetch_medal_tally(&t, &Selection::Overall, &Selection::Overall);
        assert_eq!(tally.rows.len(), 1);
        assert_eq!(tally.rows[0].key, region_key("Italy"));
    }

    #[test]
    fn test_tally_empty_selection_is_empty_table() {
        let tally = fetch_medal_tally(&relay_table(), &Selection::Specific(2004), &specific("Italy"));
        assert!(tally.rows.is_empty());
        assert_eq!(tally.grouping, TallyGrouping::Region);
    }

    #[test]
    fn test_tally_totals_consistent_for_every_selection() {
        let t = relay_table();
        let domains = country_year_list(&t);
        for year in &domains.years {
            for country in &domains.countries {
                for row in fetch_medal_tally(&t, year, country).rows {
                    assert_eq!(row.gold + row.silver + row.bronze, row.total);
                }
            }
        }
    }

    #[test]
    fn test_noc_medal_tally() {
        let tally = noc_medal_tally(&relay_table());
        assert_eq!(tally.grouping, TallyGrouping::Noc);
        assert_eq!(tally.rows[0].key, TallyKey::Noc("FRA".to_string()));
        assert_eq!(tally.rows[0].total, 2);
    }

    // ── country_year_list / sport_list ────────────────────────────────────────

    #[test]
    fn test_country_year_list_example() {
        let t = table(vec![
            event("A", "FRA", 1992, "Judo", "Judo Men's", None),
            event("B", "ITA", 2000, "Judo", "Judo Men's", None),
            event("C", "FRA", 1896, "Athletics", "Marathon", None),
            event("D", "XXX", 1896, "Athletics", "Marathon", None),
        ]);
        let lists = country_year_list(&t);
        assert_eq!(
            lists.years,
            vec![
                Selection::Overall,
                Selection::Specific(1896),
                Selection::Specific(1992),
                Selection::Specific(2000),
            ]
        );
        assert_eq!(
            lists.countries,
            vec![Selection::Overall, specific("France"), specific("Italy")]
        );
    }

    #[test]
    fn test_sport_list_sorted_with_overall_first() {
        let sports = sport_list(&relay_table());
        assert_eq!(
            sports,
            vec![
                Selection::Overall,
                specific("Fencing"),
                specific("Judo"),
                specific("Swimming"),
            ]
        );
    }

    // ── data_over_time ────────────────────────────────────────────────────────

    #[test]
    fn test_data_over_time_counts_distinct_pairs() {
        let t = relay_table();
        let nations = data_over_time(&t, Dimension::Region);
        assert_eq!(
            nations,
            vec![
                TimePoint {
                    edition: 2000,
                    count: 3
                },
                TimePoint {
                    edition: 2004,
                    count: 1
                },
            ]
        );

        let events = data_over_time(&t, Dimension::Event);
        assert_eq!(events[0].count, 4);

        let athletes = data_over_time(&t, Dimension::Athlete);
        assert_eq!(athletes[0].count, 7);
        assert_eq!(athletes[1].count, 1);
    }

    #[test]
    fn test_data_over_time_year_with_only_missing_regions() {
        let t = table(vec![event("A", "XXX", 1900, "Polo", "Polo Men's", None)]);
        let nations = data_over_time(&t, Dimension::Region);
        assert_eq!(
            nations,
            vec![TimePoint {
                edition: 1900,
                count: 0
            }]
        );
    }

    // ── overall_statistics / events_heatmap ───────────────────────────────────

    #[test]
    fn test_overall_statistics() {
        let mut events = vec![
            event("A", "FRA", 1900, "Judo", "Judo Men's", None),
            event("B", "XXX", 1906, "Judo", "Judo Men's", None),
        ];
        events[1].city = "Athina".to_string();
        let stats = overall_statistics(&table(events));
        assert_eq!(stats.editions, 1);
        assert_eq!(stats.hosts, 2);
        assert_eq!(stats.sports, 1);
        assert_eq!(stats.events, 1);
        assert_eq!(stats.athletes, 2);
        assert_eq!(stats.nations, 1);
    }

    #[test]
    fn test_events_heatmap_counts_distinct_events() {
        let heatmap = events_heatmap(&relay_table());
        assert_eq!(heatmap.rows, vec!["Fencing", "Judo", "Swimming"]);
        assert_eq!(heatmap.columns, vec![2000, 2004]);
        assert_eq!(heatmap.get("Fencing", 2000), Some(2));
        assert_eq!(heatmap.get("Swimming", 2000), Some(1));
        assert_eq!(heatmap.get("Swimming", 2004), Some(0));
        assert_eq!(heatmap.get("Rowing", 2000), None);
    }

    // ── most_successful ───────────────────────────────────────────────────────

    #[test]
    fn test_most_successful_ranks_by_medal_count() {
        let t = table(vec![
            event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("B", "ITA", 1992, "Judo", "Judo Men's", Some(Medal::Silver)),
            event("B", "ITA", 1996, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("C", "USA", 1996, "Judo", "Judo Men's", None),
        ]);
        let ranks = most_successful(&t, &Selection::Overall);
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks[0].name, "B");
        assert_eq!(ranks[0].medals, 2);
        assert_eq!(ranks[0].region.as_deref(), Some("Italy"));
        assert_eq!(ranks[1].name, "A");
    }

    #[test]
    fn test_most_successful_ties_keep_encounter_order() {
        let t = table(vec![
            event("Z", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("A", "ITA", 1992, "Judo", "Judo Women's", Some(Medal::Gold)),
        ]);
        let names: Vec<String> = most_successful(&t, &Selection::Overall)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Z", "A"]);
    }

    #[test]
    fn test_most_successful_limited_to_fifteen() {
        let events: Vec<RawEvent> = (0..20)
            .map(|i| {
                event(
                    &format!("Athlete {i}"),
                    "FRA",
                    1992,
                    "Judo",
                    "Judo Men's",
                    Some(Medal::Bronze),
                )
            })
            .collect();
        assert_eq!(most_successful(&table(events), &Selection::Overall).len(), 15);
    }

    #[test]
    fn test_most_successful_first_sport_wins() {
        let t = table(vec![
            event("M", "FRA", 1988, "Athletics", "Long Jump", None),
            event("M", "FRA", 1992, "Swimming", "100m", Some(Medal::Gold)),
            event("M", "FRA", 1996, "Swimming", "200m", Some(Medal::Gold)),
        ]);
        let ranks = most_successful(&t, &Selection::Overall);
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks[0].medals, 2);
        assert_eq!(ranks[0].sport, "Athletics");
    }

    #[test]
    fn test_most_successful_filters_by_sport() {
        let ranks = most_successful(&relay_table(), &specific("Fencing"));
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks[0].name, "I1");
    }

    #[test]
    fn test_most_successful_unknown_sport_is_empty() {
        assert!(most_successful(&relay_table(), &specific("Cricket")).is_empty());
    }

    // ── country-wise ──────────────────────────────────────────────────────────

    #[test]
    fn test_yearwise_medal_tally() {
        let t = relay_table();
        assert_eq!(
            yearwise_medal_tally(&t, "France"),
            vec![
                YearCount {
                    year: 2000,
                    medals: 1
                },
                YearCount {
                    year: 2004,
                    medals: 1
                },
            ]
        );
        assert_eq!(
            yearwise_medal_tally(&t, "USA"),
            vec![YearCount {
                year: 2000,
                medals: 1
            }]
        );
    }

    #[test]
    fn test_yearwise_medal_tally_without_medals_is_empty() {
        let t = table(vec![event("A", "FRA", 1992, "Judo", "Judo Men's", None)]);
        assert!(yearwise_medal_tally(&t, "France").is_empty());
    }

    #[test]
    fn test_country_event_heatmap_fills_zeros() {
        let heatmap = country_event_heatmap(&relay_table(), "France");
        assert_eq!(heatmap.rows, vec!["Judo"]);
        assert_eq!(heatmap.columns, vec![2000, 2004]);
        assert_eq!(heatmap.cells, vec![vec![1, 1]]);

        let mut events: Vec<RawEvent> = relay_table().iter().map(|r| r.record.clone()).collect();
        events.push(event("F3", "FRA", 2004, "Fencing", "Foil", Some(Medal::Gold)));
        let heatmap = country_event_heatmap(&table(events), "France");
        assert_eq!(heatmap.rows, vec!["Fencing", "Judo"]);
        assert_eq!(heatmap.get("Fencing", 2000), Some(0));
        assert_eq!(heatmap.get("Fencing", 2004), Some(1));
        assert_eq!(heatmap.max_value(), 1);
    }

    #[test]
    fn test_country_event_heatmap_empty() {
        let heatmap = country_event_heatmap(&relay_table(), "Atlantis");
        assert!(heatmap.is_empty());
        assert_eq!(heatmap.max_value(), 0);
    }

    #[test]
    fn test_most_successful_countrywise() {
        let t = table(vec![
            event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("A", "FRA", 1996, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("B", "FRA", 1996, "Fencing", "Foil", Some(Medal::Bronze)),
            event("C", "ITA", 1996, "Fencing", "Foil", Some(Medal::Gold)),
        ]);
        let ranks = most_successful_countrywise(&t, "France");
        assert_eq!(
            ranks,
            vec![
                CountryAthleteRank {
                    name: "A".to_string(),
                    medals: 2,
                    sport: "Judo".to_string(),
                },
                CountryAthleteRank {
                    name: "B".to_string(),
                    medals: 1,
                    sport: "Fencing".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_most_successful_countrywise_limited_to_ten() {
        let events: Vec<RawEvent> = (0..12)
            .map(|i| event(&format!("A{i}"), "ITA", 2000, "Rowing", "Eights", Some(Medal::Gold)))
            .collect();
        assert_eq!(most_successful_countrywise(&table(events), "Italy").len(), 10);
    }

    // ── athlete-wise ──────────────────────────────────────────────────────────

    #[test]
    fn test_weight_v_height_one_row_per_athlete() {
        let t = table(vec![
            event("A", "FRA", 1992, "Judo", "Judo Men's", None),
            event("A", "FRA", 1996, "Judo", "Judo Men's", Some(Medal::Gold)),
            event("A", "ITA", 1996, "Judo", "Judo Men's", None),
            event("B", "FRA", 1996, "Fencing", "Foil", Some(Medal::Silver)),
        ]);
        let profiles = weight_v_height(&t, &Selection::Overall);
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0].year, 1992);
        assert_eq!(profiles[0].medal, MedalOutcome::NoMedal);
        assert_eq!(profiles[0].medal.to_string(), "No Medal");
        assert_eq!(profiles[2].medal, MedalOutcome::Won(Medal::Silver));

        let fencing = weight_v_height(&t, &specific("Fencing"));
        assert_eq!(fencing.len(), 1);
        assert_eq!(fencing[0].name, "B");
    }

    #[test]
    fn test_weight_v_height_missing_region_is_its_own_athlete_key() {
        let t = table(vec![
            event("A", "XXX", 1992, "Judo", "Judo Men's", None),
            event("A", "YYY", 1996, "Judo", "Judo Men's", None),
        ]);
        assert_eq!(weight_v_height(&t, &Selection::Overall).len(), 1);
    }

    #[test]
    fn test_men_vs_women_missing_sex_reports_zero() {
        let t = table(vec![event("A", "FRA", 2000, "Judo", "Judo Men's", None)]);
        assert_eq!(
            men_vs_women(&t),
            vec![SexSplit {
                year: 2000,
                male: 1,
                female: 0
            }]
        );
    }

    #[test]
    fn test_men_vs_women_outer_join() {
        let mut woman = event("W", "ITA", 1900, "Tennis", "Singles", None);
        woman.sex = Sex::Female;
        let t = table(vec![woman, event("M", "FRA", 1896, "Judo", "Judo Men's", None)]);
        assert_eq!(
            men_vs_women(&t),
            vec![
                SexSplit {
                    year: 1896,
                    male: 1,
                    female: 0
                },
                SexSplit {
                    year: 1900,
                    male: 0,
                    female: 1
                },
            ]
        );
    }

    #[test]
    fn test_age_distribution() {
        let mut old = event("B", "ITA", 1992, "Judo", "Judo Men's", Some(Medal::Gold));
        old.age = Some(35);
        let mut unknown = event("C", "USA", 1992, "Judo", "Judo Men's", Some(Medal::Silver));
        unknown.age = None;
        let t = table(vec![
            event("A", "FRA", 1992, "Judo", "Judo Men's", None),
            old,
            unknown,
        ]);
        let dist = age_distribution(&t);
        assert_eq!(dist.overall, vec![24, 35]);
        assert_eq!(dist.gold, vec![35]);
        assert!(dist.silver.is_empty());
        assert!(dist.bronze.is_empty());
    }

    #[test]
    fn test_age_histogram_bins() {
        let bins = AgeDistribution::histogram(&[18, 19, 21, 24, 35], 5);
        assert_eq!(
            bins,
            vec![
                AgeBin { start: 15, count: 2 },
                AgeBin { start: 20, count: 2 },
                AgeBin { start: 35, count: 1 },
            ]
        );
    }

    #[test]
    fn test_gold_medalist_ages_by_sport() {
        let mut young = event("B", "ITA", 1992, "Swimming", "100m", Some(Medal::Gold));
        young.age = Some(17);
        let t = table(vec![
            event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold)),
            young,
            event("C", "USA", 1992, "Judo", "Judo Men's", Some(Medal::Bronze)),
        ]);
        let ages = gold_medalist_ages_by_sport(&t, &["Judo", "Swimming", "Polo"]);
        assert_eq!(ages.len(), 3);
        assert_eq!(ages[0].ages, vec![24]);
        assert_eq!(ages[1].ages, vec![17]);
        assert!(ages[2].ages.is_empty());
    }

    #[test]
    fn test_aggregations_leave_table_untouched() {
        let t = relay_table();
        let before = t.clone();
        let _ = fetch_medal_tally(&t, &Selection::Overall, &Selection::Overall);
        let _ = weight_v_height(&t, &Selection::Overall);
        let _ = most_successful(&t, &Selection::Overall);
        assert_eq!(t, before);
    }
}
