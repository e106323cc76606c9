//! Per-habit completion ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of calendar dates on which a habit was completed.
///
/// Dates are unique and kept in ascending order. Serializes as an array of
/// `YYYY-MM-DD` strings; duplicates in stored data collapse on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLedger {
    dates: BTreeSet<NaiveDate>,
}

/// Direction of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub completed: bool,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict toggle: add `date` if absent, remove it if present.
    ///
    /// Calling twice with the same date restores the original set.
    pub fn toggle(&mut self, date: NaiveDate) -> ToggleOutcome {
        if self.dates.remove(&date) {
            ToggleOutcome { completed: false }
        } else {
            self.dates.insert(date);
            ToggleOutcome { completed: true }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Ascending iteration.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Dates on or after `start`.
    pub fn since(&self, start: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.range(start..).copied()
    }
}

impl FromIterator<NaiveDate> for CompletionLedger {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut ledger = CompletionLedger::new();
        assert!(ledger.toggle(d(2024, 5, 1)).completed);
        assert!(ledger.contains(d(2024, 5, 1)));
        assert!(!ledger.toggle(d(2024, 5, 1)).completed);
        assert!(ledger.is_empty());
    }

    #[test]
    fn since_is_inclusive() {
        let ledger: CompletionLedger = [d(2024, 5, 1), d(2024, 5, 3), d(2024, 5, 6)]
            .into_iter()
            .collect();
        let got: Vec<_> = ledger.since(d(2024, 5, 3)).collect();
        assert_eq!(got, vec![d(2024, 5, 3), d(2024, 5, 6)]);
        assert_eq!(ledger.latest(), Some(d(2024, 5, 6)));
    }

    proptest! {
        #[test]
        fn toggling_twice_is_identity(
            seed in proptest::collection::vec(0i64..60, 0..20),
            pick in 0i64..60,
        ) {
            let base = d(2024, 1, 1);
            let mut ledger: CompletionLedger =
                seed.iter().map(|n| base + chrono::Duration::days(*n)).collect();
            let before = ledger.clone();
            let date = base + chrono::Duration::days(pick);
            ledger.toggle(date);
            ledger.toggle(date);
            prop_assert_eq!(ledger, before);
        }

        #[test]
        fn never_holds_duplicates(ops in proptest::collection::vec(0i64..10, 0..50)) {
            let base = d(2024, 1, 1);
            let mut ledger = CompletionLedger::new();
            for n in ops {
                ledger.toggle(base + chrono::Duration::days(n));
            }
            let dates: Vec<_> = ledger.iter().collect();
            let mut deduped = dates.clone();
            deduped.dedup();
            prop_assert_eq!(dates, deduped);
        }
    }
}
