//! Tag-indexed exercise pool built from saved plans.

use std::collections::{BTreeMap, HashSet};

use log::debug;
use serde::Serialize;

use crate::models::{Exercise, ExerciseKey, Plan};

/// Deduplicated universe of candidate exercises, bucketed by tag.
///
/// Every bucket present in the pool is non-empty, and no two entries share
/// the same `(name, tag)` key. The pool is derived data: rebuild it whenever
/// the set of saved plans changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExercisePool {
    buckets: BTreeMap<String, Vec<Exercise>>,
}

impl ExercisePool {
    /// Builds the pool from every exercise row in `plans`.
    ///
    /// The first occurrence of a `(name, tag)` key wins; later duplicates
    /// are dropped, not merged. Rows without a tag are skipped.
    pub fn from_plans<'a, I>(plans: I) -> Self
    where
        I: IntoIterator<Item = &'a Plan>,
    {
        let pool: Self = plans
            .into_iter()
            .flat_map(|plan| plan.exercises.iter())
            .filter_map(|row| {
                row.key().map(|ExerciseKey { name, tag }| Exercise {
                    name,
                    tag,
                    prescription: row.prescription.clone(),
                })
            })
            .collect();

        debug!(
            "Built exercise pool: {} exercises across {} tags",
            pool.len(),
            pool.buckets.len()
        );
        pool
    }

    /// Exercises available for `tag`; empty when the tag is unknown.
    pub fn get(&self, tag: &str) -> &[Exercise] {
        self.buckets.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of exercises available for `tag`.
    pub fn available(&self, tag: &str) -> usize {
        self.get(tag).len()
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.buckets.contains_key(tag)
    }

    /// Tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Iterates `(tag, exercises)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Exercise])> {
        self.buckets
            .iter()
            .map(|(tag, exercises)| (tag.as_str(), exercises.as_slice()))
    }

    /// Total number of exercises across all tags.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl FromIterator<Exercise> for ExercisePool {
    fn from_iter<I: IntoIterator<Item = Exercise>>(iter: I) -> Self {
        let mut seen: HashSet<ExerciseKey> = HashSet::new();
        let mut buckets: BTreeMap<String, Vec<Exercise>> = BTreeMap::new();

        for exercise in iter {
            if exercise.tag.trim().is_empty() || !seen.insert(exercise.key()) {
                continue;
            }
            buckets
                .entry(exercise.tag.clone())
                .or_default()
                .push(exercise);
        }

        Self { buckets }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Prescription;

    fn chest(name: &str, sets: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            tag: "Chest".to_string(),
            prescription: Prescription::new(sets, "10", "", "60s"),
        }
    }

    #[test]
    fn test_duplicate_key_keeps_first_occurrence() {
        let pool: ExercisePool = vec![chest("Bench Press", "3"), chest("Bench Press", "5")]
            .into_iter()
            .collect();

        assert_eq!(pool.available("Chest"), 1);
        assert_eq!(pool.get("Chest")[0].prescription.sets, "3");
    }

    #[test]
    fn test_same_name_under_two_tags_is_kept_twice() {
        let mut triceps = chest("Dips", "3");
        triceps.tag = "Triceps".to_string();
        let pool: ExercisePool = vec![chest("Dips", "3"), triceps].into_iter().collect();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.tags().collect::<Vec<_>>(), vec!["Chest", "Triceps"]);
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let pool: ExercisePool = vec![chest("Bench Press", "3"), chest("bench press", "3")]
            .into_iter()
            .collect();
        assert_eq!(pool.available("Chest"), 2);
    }

    #[test]
    fn test_untagged_rows_are_excluded() {
        let now = Timestamp::now();
        let plan = Plan::draft("Mixed", now)
            .with_exercise("Plank", None, Prescription::default())
            .with_exercise("Crunch", Some("  ".to_string()), Prescription::default())
            .with_exercise("Squat", Some("Legs".to_string()), Prescription::default());

        let pool = ExercisePool::from_plans([&plan]);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains_tag("Legs"));
        assert!(pool.get("Core").is_empty());
    }

    #[test]
    fn test_empty_input_gives_empty_pool() {
        let pool = ExercisePool::from_plans(std::iter::empty::<&Plan>());
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }
}
