//! Exercise model definitions and identity keys.

use serde::{Deserialize, Serialize};

/// Identity of an exercise in the pool.
///
/// Two exercises are the same pool entry when both `name` and `tag` match
/// exactly; comparison is case-sensitive and uses the values as stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExerciseKey {
    /// Exercise name as stored
    pub name: String,

    /// Muscle-group tag as stored
    pub tag: String,
}

impl ExerciseKey {
    /// Creates a key from a name and tag.
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }
}

/// Workout parameters attached to an exercise row.
///
/// All fields are display strings ("3", "8-12", "40kg", "90s"); the engine
/// copies them around but never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(default)]
    pub sets: String,

    #[serde(default)]
    pub reps: String,

    #[serde(default)]
    pub weight: String,

    #[serde(default)]
    pub rest: String,
}

impl Prescription {
    /// Creates a prescription from its four display values.
    pub fn new(
        sets: impl Into<String>,
        reps: impl Into<String>,
        weight: impl Into<String>,
        rest: impl Into<String>,
    ) -> Self {
        Self {
            sets: sets.into(),
            reps: reps.into(),
            weight: weight.into(),
            rest: rest.into(),
        }
    }
}

/// A candidate exercise held by the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,

    /// Muscle-group tag; always present for pool entries
    pub tag: String,

    /// Parameters copied from the plan the entry was first seen in
    #[serde(flatten)]
    pub prescription: Prescription,
}

impl Exercise {
    /// Returns the `(name, tag)` identity of this exercise.
    pub fn key(&self) -> ExerciseKey {
        ExerciseKey::new(&self.name, &self.tag)
    }

    /// Whether this exercise has the given identity.
    pub fn is(&self, key: &ExerciseKey) -> bool {
        self.name == key.name && self.tag == key.tag
    }
}

/// Identity of one exercise slot inside one plan.
///
/// Slot ids are allocated from the plan's own counter, so the same source
/// exercise placed in two plans (or twice in one plan) gets distinct slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u64);

/// One exercise row within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanExercise {
    /// Slot identity, unique within the owning plan
    pub slot: SlotId,

    /// Exercise name
    pub name: String,

    /// Muscle-group tag, if the row has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Sets, reps, weight and rest for this row
    #[serde(flatten)]
    pub prescription: Prescription,
}

impl PlanExercise {
    /// Clones a pool exercise into a new slot.
    pub(crate) fn from_exercise(source: &Exercise, slot: SlotId) -> Self {
        Self {
            slot,
            name: source.name.clone(),
            tag: Some(source.tag.clone()),
            prescription: source.prescription.clone(),
        }
    }

    /// Returns the row's tag, treating blank tags as missing.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|tag| !tag.trim().is_empty())
    }

    /// Returns the `(name, tag)` identity, or `None` for untagged rows.
    pub fn key(&self) -> Option<ExerciseKey> {
        self.tag().map(|tag| ExerciseKey::new(&self.name, tag))
    }

    /// Whether the row carries exactly the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }
}
