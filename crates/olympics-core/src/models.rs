use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Parameter value meaning "no filter on this dimension".
pub const OVERALL: &str = "Overall";

/// Label used for athletes without a medal in per-athlete views.
pub const NO_MEDAL: &str = "No Medal";

// ── Medal / Season / Sex ──────────────────────────────────────────────────────

/// A podium finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// All medal kinds in podium order.
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }

    /// Parse a `Medal` cell. `NA` and empty cells mean "no medal".
    pub fn parse_cell(cell: &str) -> Result<Option<Medal>, String> {
        match cell.trim() {
            "" | "NA" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl FromStr for Medal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gold" => Ok(Medal::Gold),
            "Silver" => Ok(Medal::Silver),
            "Bronze" => Ok(Medal::Bronze),
            other => Err(format!("invalid Medal '{}'", other)),
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which Games a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Summer,
    Winter,
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Summer" => Ok(Season::Summer),
            "Winter" => Ok(Season::Winter),
            other => Err(format!("invalid Season '{}'", other)),
        }
    }
}

/// Athlete sex as recorded in the source (`M` / `F`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            other => Err(format!("invalid Sex '{}'", other)),
        }
    }
}

// ── Measurement ───────────────────────────────────────────────────────────────

/// Height (cm) or weight (kg).
///
/// Compared and hashed bitwise so that whole rows can be deduplicated.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Measurement(pub f64);

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Measurement {}

impl Hash for Measurement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

// ── Raw records ───────────────────────────────────────────────────────────────

/// One athlete-event participation, exactly as read from the events file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RawEvent {
    pub name: String,
    pub sex: Sex,
    pub age: Option<u32>,
    pub height: Option<Measurement>,
    pub weight: Option<Measurement>,
    pub team: String,
    pub noc: String,
    pub games: String,
    pub year: i32,
    pub season: Season,
    pub city: String,
    pub sport: String,
    pub event: String,
    pub medal: Option<Medal>,
}

/// One row of the NOC → region lookup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionRecord {
    pub noc: String,
    pub region: Option<String>,
    pub notes: Option<String>,
}

/// NOC code → region mapping.
#[derive(Debug, Clone, Default)]
pub struct RegionLookup {
    by_noc: HashMap<String, RegionRecord>,
}

impl RegionLookup {
    /// Build the lookup. When a NOC code appears twice the first row wins.
    pub fn from_records(records: Vec<RegionRecord>) -> Self {
        let mut by_noc = HashMap::with_capacity(records.len());
        for record in records {
            if by_noc.contains_key(&record.noc) {
                tracing::warn!("Duplicate NOC '{}' in region lookup; keeping first", record.noc);
                continue;
            }
            by_noc.insert(record.noc.clone(), record);
        }
        Self { by_noc }
    }

    pub fn get(&self, noc: &str) -> Option<&RegionRecord> {
        self.by_noc.get(noc)
    }

    pub fn len(&self) -> usize {
        self.by_noc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_noc.is_empty()
    }
}

// ── Medal indicators ──────────────────────────────────────────────────────────

/// One-hot medal flags. All three fields are always present, so grouping code
/// never depends on which medals occur in a given subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MedalIndicators {
    pub gold: bool,
    pub silver: bool,
    pub bronze: bool,
}

impl MedalIndicators {
    pub fn from_medal(medal: Option<Medal>) -> Self {
        Self {
            gold: medal == Some(Medal::Gold),
            silver: medal == Some(Medal::Silver),
            bronze: medal == Some(Medal::Bronze),
        }
    }

    /// Number of flags set; never more than one.
    pub fn count(&self) -> u32 {
        u32::from(self.gold) + u32::from(self.silver) + u32::from(self.bronze)
    }
}

// ── Canonical table ───────────────────────────────────────────────────────────

/// Anything that carries a raw event record.
///
/// Implemented for canonical rows too, so previously preprocessed data can be
/// fed back through the preprocessor.
pub trait EventRecord {
    fn event(&self) -> &RawEvent;
}

impl EventRecord for RawEvent {
    fn event(&self) -> &RawEvent {
        self
    }
}

impl EventRecord for CanonicalRow {
    fn event(&self) -> &RawEvent {
        &self.record
    }
}

/// A Summer-Games record joined with its region and medal indicators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalRow {
    #[serde(flatten)]
    pub record: RawEvent,
    pub region: Option<String>,
    pub notes: Option<String>,
    pub medals: MedalIndicators,
}

impl CanonicalRow {
    /// Join `record` with its (possibly missing) region row.
    pub fn new(record: RawEvent, region: Option<&RegionRecord>) -> Self {
        let medals = MedalIndicators::from_medal(record.medal);
        Self {
            region: region.and_then(|r| r.region.clone()),
            notes: region.and_then(|r| r.notes.clone()),
            medals,
            record,
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn year(&self) -> i32 {
        self.record.year
    }

    pub fn sport(&self) -> &str {
        &self.record.sport
    }

    pub fn medal(&self) -> Option<Medal> {
        self.record.medal
    }
}

/// The joined, deduplicated, medal-enriched table every query reads.
///
/// Immutable once built; clones share the same rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    rows: Arc<[CanonicalRow]>,
}

impl CanonicalTable {
    pub fn from_rows(rows: Vec<CanonicalRow>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for CanonicalTable {
    fn default() -> Self {
        Self::from_rows(Vec::new())
    }
}

// ── Query parameters ──────────────────────────────────────────────────────────

/// A query parameter: either no filter, or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selection<T> {
    Overall,
    Specific(T),
}

impl<T> Selection<T> {
    pub fn is_overall(&self) -> bool {
        matches!(self, Selection::Overall)
    }

    pub fn specific(&self) -> Option<&T> {
        match self {
            Selection::Overall => None,
            Selection::Specific(v) => Some(v),
        }
    }

    /// `true` when `value` passes this filter.
    pub fn matches<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self {
            Selection::Overall => true,
            Selection::Specific(v) => v.borrow() == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Overall => f.write_str(OVERALL),
            Selection::Specific(v) => v.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::Overall => serializer.serialize_str(OVERALL),
            Selection::Specific(v) => v.serialize(serializer),
        }
    }
}

/// Medal column of per-athlete views, where "no medal" is shown explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MedalOutcome {
    Won(Medal),
    NoMedal,
}

impl From<Option<Medal>> for MedalOutcome {
    fn from(medal: Option<Medal>) -> Self {
        medal.map_or(MedalOutcome::NoMedal, MedalOutcome::Won)
    }
}

impl fmt::Display for MedalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedalOutcome::Won(m) => m.fmt(f),
            MedalOutcome::NoMedal => f.write_str(NO_MEDAL),
        }
    }
}

impl Serialize for MedalOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
