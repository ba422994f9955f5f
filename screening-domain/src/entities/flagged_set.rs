// Flagged set entity
// Rows selected by a single rule; never merged with other rules

use std::collections::BTreeMap;

use crate::value_objects::{RowId, RuleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedSet {
    rule: RuleId,
    rows: BTreeMap<RowId, Option<u32>>,
}

impl FlaggedSet {
    pub fn new(rule: RuleId) -> Self {
        Self {
            rule,
            rows: BTreeMap::new(),
        }
    }

    pub fn rule(&self) -> RuleId {
        self.rule
    }

    pub fn insert(&mut self, row: RowId) {
        self.rows.entry(row).or_insert(None);
    }

    /// Flags `row` and records the hour-of-day that triggered it.
    pub fn insert_with_hour(&mut self, row: RowId, hour: u32) {
        self.rows.insert(row, Some(hour));
    }

    pub fn contains(&self, row: RowId) -> bool {
        self.rows.contains_key(&row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flagged rows in ascending input order.
    pub fn rows(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.keys().copied()
    }

    pub fn hour_of(&self, row: RowId) -> Option<u32> {
        self.rows.get(&row).copied().flatten()
    }
}

impl Extend<RowId> for FlaggedSet {
    fn extend<I: IntoIterator<Item = RowId>>(&mut self, iter: I) {
        for row in iter {
            self.insert(row);
        }
    }
}
