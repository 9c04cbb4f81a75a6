//! Builds the canonical analysis table from the raw source tables.

use std::collections::HashSet;

use olympics_core::models::{
    CanonicalRow, CanonicalTable, EventRecord, RawEvent, RegionLookup, Season,
};
use tracing::debug;

/// Join and normalise raw events into the [`CanonicalTable`].
///
/// 1. Keep Summer Games rows only.
/// 2. Left-join the region lookup on NOC; unmatched rows keep a missing region.
/// 3. Drop exact-duplicate rows, keeping the first occurrence.
/// 4. Derive the Gold/Silver/Bronze indicators from the medal field.
///
/// Accepts canonical rows as input too: their region and indicators are
/// discarded and rebuilt, so preprocessing is idempotent.
pub fn preprocess<E: EventRecord>(events: &[E], regions: &RegionLookup) -> CanonicalTable {
    let mut seen: HashSet<&RawEvent> = HashSet::with_capacity(events.len());
    let mut rows = Vec::with_capacity(events.len());
    let mut winter = 0usize;
    let mut unmatched = 0usize;

    for item in events {
        let record = item.event();
        if record.season != Season::Summer {
            winter += 1;
            continue;
        }
        // Region and notes depend only on the NOC, so the raw record alone
        // identifies the joined row.
        if !seen.insert(record) {
            continue;
        }
        let region = regions.get(&record.noc);
        if region.and_then(|r| r.region.as_ref()).is_none() {
            unmatched += 1;
        }
        rows.push(CanonicalRow::new(record.clone(), region));
    }

    debug!(
        "Preprocessed {} input rows: {} winter dropped, {} duplicates dropped, {} without region",
        events.len(),
        winter,
        events.len() - winter - rows.len(),
        unmatched,
    );

    CanonicalTable::from_rows(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{event, regions};
    use olympics_core::models::{Medal, MedalIndicators};

    #[test]
    fn test_winter_rows_are_dropped() {
        let mut winter = event("A", "FRA", 1994, "Alpine Skiing", "Slalom", None);
        winter.season = Season::Winter;
        winter.games = "1994 Winter".to_string();
        let summer = event("B", "FRA", 1992, "Judo", "Judo Men's", None);

        let table = preprocess(&[winter, summer], &regions());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].name(), "B");
    }

    #[test]
    fn test_left_join_keeps_unmatched_noc() {
        let table = preprocess(
            &[event("A", "XXX", 1992, "Judo", "Judo Men's", None)],
            &regions(),
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].region(), None);
    }

    #[test]
    fn test_join_maps_noc_to_region() {
        let table = preprocess(
            &[event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold))],
            &regions(),
        );
        assert_eq!(table.rows()[0].region(), Some("France"));
    }

    #[test]
    fn test_exact_duplicates_removed_keeping_first() {
        let a = event("A", "FRA", 1992, "Judo", "Judo Men's", None);
        let b = event("B", "ITA", 1992, "Judo", "Judo Men's", None);
        let table = preprocess(&[a.clone(), b.clone(), a.clone()], &regions());

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].name(), "A");
        assert_eq!(table.rows()[1].name(), "B");
    }

    #[test]
    fn test_near_duplicates_are_kept() {
        let a = event("A", "FRA", 1992, "Judo", "Judo Men's", None);
        let mut older = a.clone();
        older.age = Some(99);
        let table = preprocess(&[a, older], &regions());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_indicators_present_when_no_medals_awarded() {
        let table = preprocess(
            &[
                event("A", "FRA", 1992, "Judo", "Judo Men's", None),
                event("B", "ITA", 1992, "Judo", "Judo Men's", None),
            ],
            &regions(),
        );
        for row in table.iter() {
            assert_eq!(row.medals, MedalIndicators::default());
        }
    }

    #[test]
    fn test_indicators_one_hot() {
        let table = preprocess(
            &[
                event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold)),
                event("B", "ITA", 1992, "Judo", "Judo Men's", Some(Medal::Bronze)),
            ],
            &regions(),
        );
        assert!(table.rows()[0].medals.gold);
        assert!(table.rows()[1].medals.bronze);
        assert!(table.iter().all(|r| r.medals.count() <= 1));
    }

    #[test]
    fn test_preprocess_is_idempotent() {
        let a = event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Gold));
        let mut winter = event("C", "ITA", 1994, "Luge", "Luge Men's", None);
        winter.season = Season::Winter;
        let events = vec![
            a.clone(),
            event("B", "XXX", 1996, "Judo", "Judo Men's", Some(Medal::Silver)),
            a,
            winter,
        ];

        let once = preprocess(&events, &regions());
        let twice = preprocess(once.rows(), &regions());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_stale_indicators_are_rebuilt() {
        let once = preprocess(
            &[event("A", "FRA", 1992, "Judo", "Judo Men's", Some(Medal::Silver))],
            &regions(),
        );
        let mut stale = once.rows().to_vec();
        stale[0].medals = MedalIndicators {
            gold: true,
            silver: false,
            bronze: true,
        };
        stale[0].region = Some("Somewhere else".to_string());

        let rebuilt = preprocess(&stale, &regions());
        assert_eq!(rebuilt, once);
    }
}
