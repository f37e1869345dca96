//! Per-slot history of recently shown exercises.

use std::collections::{BTreeMap, VecDeque};

use crate::models::ExerciseKey;

/// How many recently shown exercises a slot remembers by default.
pub const DEFAULT_HISTORY_WINDOW: usize = 3;

/// Recently shown exercises, per slot position, used to keep rerolls from
/// bouncing between the same few choices.
///
/// Each position keeps at most `window` keys, oldest first. A window of 0
/// disables the history. The history belongs to one editing session and is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerollHistory {
    window: usize,
    entries: BTreeMap<usize, VecDeque<ExerciseKey>>,
}

impl RerollHistory {
    /// Creates an empty history keeping `window` entries per position.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            entries: BTreeMap::new(),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Keys recorded for `position`, oldest first.
    pub fn recent(&self, position: usize) -> impl Iterator<Item = &ExerciseKey> {
        self.entries.get(&position).into_iter().flatten()
    }

    /// Whether `key` is inside the window for `position`.
    pub fn contains(&self, position: usize, key: &ExerciseKey) -> bool {
        self.recent(position).any(|recent| recent == key)
    }

    /// Returns a copy with `key` pushed onto `position`'s window, evicting
    /// the oldest entry when the window is full.
    #[must_use]
    pub fn record(&self, position: usize, key: ExerciseKey) -> Self {
        let mut next = self.clone();
        if next.window == 0 {
            return next;
        }

        let slot = next.entries.entry(position).or_default();
        slot.push_back(key);
        while slot.len() > next.window {
            slot.pop_front();
        }
        next
    }

    /// Returns a copy with several keys recorded in order.
    #[must_use]
    pub fn with_recent<I>(&self, position: usize, keys: I) -> Self
    where
        I: IntoIterator<Item = ExerciseKey>,
    {
        keys.into_iter()
            .fold(self.clone(), |history, key| history.record(position, key))
    }
}

impl Default for RerollHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> ExerciseKey {
        ExerciseKey::new(name, "Chest")
    }

    #[test]
    fn test_window_evicts_oldest() {
        let history = RerollHistory::new(2).with_recent(0, [key("A"), key("B"), key("C")]);
        let recent: Vec<_> = history.recent(0).map(|k| k.name.as_str()).collect();
        assert_eq!(recent, vec!["B", "C"]);
    }

    #[test]
    fn test_positions_are_independent() {
        let history = RerollHistory::default().record(0, key("A"));
        assert!(history.contains(0, &key("A")));
        assert!(!history.contains(1, &key("A")));
    }

    #[test]
    fn test_zero_window_records_nothing() {
        let history = RerollHistory::new(0).record(0, key("A"));
        assert_eq!(history.recent(0).count(), 0);
    }

    #[test]
    fn test_record_leaves_original_untouched() {
        let original = RerollHistory::new(1);
        let updated = original.record(3, key("A"));
        assert_eq!(original.recent(3).count(), 0);
        assert_eq!(updated.recent(3).count(), 1);
    }
}
