///! Table view state: current sort column and search text.

use cosmic_common::NeoRecord;

use super::sort::{SortDirection, SortKey, SortState, filter_records, sort_records};

#[derive(Debug, Clone, Default)]
pub struct NeoTableView {
    pub sort: SortState,
    pub query: String,
}

impl NeoTableView {
    pub fn select_sort(&mut self, key: SortKey) {
        self.sort.select(key);
    }

    /// Toggle between risk order (most dangerous first) and the default
    /// distance order. Returns true when risk order is now active.
    pub fn toggle_risk_order(&mut self) -> bool {
        if self.is_risk_order() {
            self.sort = SortState::default();
            false
        } else {
            self.sort = SortState {
                key: SortKey::Risk,
                direction: SortDirection::Ascending,
            };
            true
        }
    }

    pub fn is_risk_order(&self) -> bool {
        self.sort.key == SortKey::Risk
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into().trim().to_string();
    }

    /// Filter then sort. Risk order keeps nearer objects first within a tier.
    pub fn apply<'a>(&self, records: &'a [NeoRecord]) -> Vec<&'a NeoRecord> {
        let mut visible = filter_records(records, &self.query);
        if self.is_risk_order() {
            sort_records(&mut visible, SortKey::Distance, SortDirection::Ascending);
        }
        sort_records(&mut visible, self.sort.key, self.sort.direction);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::neo::fixtures::record;
    use crate::module::neo::sort::{matches_query, sorted};

    #[test]
    fn test_risk_toggle_restores_default() {
        let mut view = NeoTableView::default();
        view.select_sort(SortKey::Velocity);

        assert!(view.toggle_risk_order());
        assert_eq!(view.sort.key, SortKey::Risk);

        assert!(!view.toggle_risk_order());
        assert_eq!(view.sort, SortState::default());
    }

    #[test]
    fn test_filter_does_not_change_relative_order() {
        let records = vec![
            record("1", "(2024 AB)", false, 300.0),
            record("2", "(2023 XY)", false, 100.0),
            record("3", "(2024 CD)", false, 200.0),
            record("4", "(2024 EF)", false, 200.0),
        ];

        let mut view = NeoTableView::default();
        view.set_query(" 2024 ");
        let visible: Vec<&str> = view.apply(&records).iter().map(|r| r.id.as_str()).collect();

        let full: Vec<&str> = sorted(&records, SortKey::Distance, SortDirection::Ascending)
            .into_iter()
            .filter(|r| matches_query(r, "2024"))
            .map(|r| r.id.as_str())
            .collect();

        assert_eq!(visible, full);
        assert_eq!(visible, vec!["3", "4", "1"]);
    }

    #[test]
    fn test_risk_order_breaks_ties_by_distance() {
        let records = vec![
            record("far", "(Far)", false, 4_900_000.0),
            record("near", "(Near)", false, 1_000.0),
        ];

        let mut view = NeoTableView::default();
        view.toggle_risk_order();
        let visible: Vec<&str> = view.apply(&records).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(visible, vec!["near", "far"]);

        // The bare comparator leaves same-tier rows in input order
        let plain: Vec<&str> = sorted(&records, SortKey::Risk, SortDirection::Ascending)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(plain, vec!["far", "near"]);
    }
}
