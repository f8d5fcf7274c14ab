///! Table sorting and search
///!
///! Sorting is stable for every key: the direction only flips the
///! comparator, so equal-key records keep their original relative order in
///! both directions. Filtering runs before sorting and never reorders.

use cosmic_common::NeoRecord;
use std::borrow::Borrow;
use std::cmp::Ordering;

use super::risk::classify;

/// Column a table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Diameter,
    Distance,
    Velocity,
    Hazardous,
    Risk,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::Diameter,
        SortKey::Distance,
        SortKey::Velocity,
        SortKey::Hazardous,
        SortKey::Risk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Diameter => "diameter",
            SortKey::Distance => "distance",
            SortKey::Velocity => "velocity",
            SortKey::Hazardous => "hazardous",
            SortKey::Risk => "risk",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown sort key: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Current sort column and direction of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Distance,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Clicking the active column flips its direction; any other column
    /// starts ascending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.toggle();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Case-insensitive name order with lowercase before uppercase on ties
pub fn collate_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Unclassifiable records rank after Low
fn risk_rank(record: &NeoRecord) -> u8 {
    classify(record).map(|tier| tier.priority()).unwrap_or(3)
}

/// Ascending comparison of two records on one key. Missing approach data
/// compares as 0 for distance and velocity.
pub fn compare(a: &NeoRecord, b: &NeoRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => collate_names(&a.name, &b.name),
        SortKey::Diameter => a.diameter.max_km().total_cmp(&b.diameter.max_km()),
        SortKey::Distance => a
            .nearest_miss_km()
            .unwrap_or(0.0)
            .total_cmp(&b.nearest_miss_km().unwrap_or(0.0)),
        SortKey::Velocity => a
            .nearest_velocity_kmh()
            .unwrap_or(0.0)
            .total_cmp(&b.nearest_velocity_kmh().unwrap_or(0.0)),
        SortKey::Hazardous => a.hazardous.cmp(&b.hazardous),
        SortKey::Risk => risk_rank(a).cmp(&risk_rank(b)),
    }
}

/// Stable in-place sort of records (or references to them)
pub fn sort_records<R: Borrow<NeoRecord>>(records: &mut [R], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ord = compare(a.borrow(), b.borrow(), key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Sorted copy of references into `records`
pub fn sorted(records: &[NeoRecord], key: SortKey, direction: SortDirection) -> Vec<&NeoRecord> {
    let mut refs: Vec<&NeoRecord> = records.iter().collect();
    sort_records(&mut refs, key, direction);
    refs
}

/// Case-insensitive substring match on name or identifier. A blank query
/// matches everything.
pub fn matches_query(record: &NeoRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(&query) || record.id.to_lowercase().contains(&query)
}

pub fn filter_records<'a>(records: &'a [NeoRecord], query: &str) -> Vec<&'a NeoRecord> {
    records.iter().filter(|r| matches_query(r, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::neo::fixtures::{bare_record, record, record_with};

    fn ids(records: &[&NeoRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_distance_sort_is_stable() {
        let records = vec![
            record("A", "(A)", false, 100.0),
            record("B", "(B)", false, 50.0),
            record("C", "(C)", false, 50.0),
        ];

        let asc = sorted(&records, SortKey::Distance, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec!["B", "C", "A"]);

        // Ties keep B before C when descending as well
        let desc = sorted(&records, SortKey::Distance, SortDirection::Descending);
        assert_eq!(ids(&desc), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let records = vec![
            record_with("1", "(Z)", true, 3.0, 10.0, 0.5),
            record_with("2", "(y)", false, 1.0, 30.0, 0.5),
            record_with("3", "(x)", false, 2.0, 20.0, 0.1),
            record_with("4", "(W)", true, 2.0, 20.0, 0.9),
        ];

        for key in SortKey::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let once = sorted(&records, key, direction);
                let mut twice = once.clone();
                sort_records(&mut twice, key, direction);
                assert_eq!(ids(&once), ids(&twice), "key {} {}", key, direction.as_str());
            }
        }
    }

    #[test]
    fn test_reverse_keeps_tie_order() {
        let records = vec![
            record_with("a", "(a)", false, 1.0, 10.0, 0.2),
            record_with("b", "(b)", false, 1.0, 20.0, 0.2),
            record_with("c", "(c)", false, 1.0, 30.0, 0.7),
        ];

        let asc = sorted(&records, SortKey::Diameter, SortDirection::Ascending);
        let desc = sorted(&records, SortKey::Diameter, SortDirection::Descending);
        assert_eq!(ids(&asc), vec!["a", "b", "c"]);
        assert_eq!(ids(&desc), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_name_collation() {
        assert_eq!(collate_names("apple", "Banana"), Ordering::Less);
        assert_eq!(collate_names("Banana", "apple"), Ordering::Greater);
        assert_eq!(collate_names("a", "A"), Ordering::Less);
        assert_eq!(collate_names("(2010 PK9)", "(2010 PK9)"), Ordering::Equal);
    }

    #[test]
    fn test_risk_sort() {
        let records = vec![
            record("low", "(L)", false, 9_000_000.0),
            bare_record("none", "(N)", false),
            record("med", "(M)", false, 1_000.0),
            record("high", "(H)", true, 9_000_000.0),
        ];

        let asc = sorted(&records, SortKey::Risk, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec!["high", "med", "low", "none"]);
    }

    #[test]
    fn test_hazardous_and_missing_numeric() {
        let records = vec![
            record("h", "(H)", true, 10.0),
            bare_record("b", "(B)", false),
            record("s", "(S)", false, 5.0),
        ];

        let by_hazard = sorted(&records, SortKey::Hazardous, SortDirection::Ascending);
        assert_eq!(ids(&by_hazard), vec!["b", "s", "h"]);

        let by_distance = sorted(&records, SortKey::Distance, SortDirection::Ascending);
        assert_eq!(ids(&by_distance), vec!["b", "s", "h"]);
    }

    #[test]
    fn test_sort_state_select() {
        let mut state = SortState::default();
        assert_eq!(state.key, SortKey::Distance);

        state.select(SortKey::Distance);
        assert_eq!(state.direction, SortDirection::Descending);

        state.select(SortKey::Name);
        assert_eq!(state.key, SortKey::Name);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_filter() {
        let records = vec![
            record("3542519", "(2010 PK9)", false, 1.0),
            record("2000433", "433 Eros (A898 PA)", false, 2.0),
            record("54016393", "(2020 PK1)", false, 3.0),
        ];

        assert_eq!(filter_records(&records, "  pk").len(), 2);
        assert_eq!(filter_records(&records, "EROS").len(), 1);
        assert_eq!(filter_records(&records, "2000433").len(), 1);
        assert_eq!(filter_records(&records, "").len(), 3);
        assert!(filter_records(&records, "apophis").is_empty());
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Velocity".parse::<SortKey>().unwrap(), SortKey::Velocity);
        assert!("mass".parse::<SortKey>().is_err());
    }
}
