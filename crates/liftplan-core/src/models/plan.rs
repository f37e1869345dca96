//! Plan model definition and related functionality.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{PlanExercise, Prescription, SlotId, TagQuota};
use crate::error::{PlannerError, Result};

fn first_slot() -> u64 {
    1
}

/// A workout plan: an ordered list of exercise rows plus metadata.
///
/// Generated plans use the same record with `is_generated` set, a generation
/// timestamp, the quotas they were drawn from, and per-slot pin flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan (0 until the plan is stored)
    #[serde(default)]
    pub id: u64,

    /// Display name of the plan
    pub name: String,

    /// Exercise rows in display order
    #[serde(default)]
    pub exercises: Vec<PlanExercise>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Whether the plan came out of the workout generator
    #[serde(default)]
    pub is_generated: bool,

    /// When the exercises were last drawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_timestamp: Option<Timestamp>,

    /// Pin flags keyed by slot; absent or false means unpinned
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pin_status: BTreeMap<SlotId, bool>,

    /// Quotas the plan was generated from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quotas: Vec<TagQuota>,

    /// Next unused slot number
    #[serde(default = "first_slot")]
    pub next_slot: u64,
}

impl Plan {
    /// Creates an empty, unsaved plan.
    pub fn draft(name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: 0,
            name: name.into(),
            exercises: Vec::new(),
            created_at: now,
            updated_at: now,
            is_generated: false,
            generation_timestamp: None,
            pin_status: BTreeMap::new(),
            quotas: Vec::new(),
            next_slot: first_slot(),
        }
    }

    /// Appends an exercise row in a fresh slot.
    pub fn with_exercise(
        mut self,
        name: impl Into<String>,
        tag: Option<String>,
        prescription: Prescription,
    ) -> Self {
        let slot = self.allocate_slot();
        self.exercises.push(PlanExercise {
            slot,
            name: name.into(),
            tag,
            prescription,
        });
        self
    }

    /// Takes the next slot id from the plan's counter.
    pub(crate) fn allocate_slot(&mut self) -> SlotId {
        // Stored plans may predate the counter; never hand out an id in use.
        let floor = self
            .exercises
            .iter()
            .map(|exercise| exercise.slot.0 + 1)
            .max()
            .unwrap_or(1);
        let slot = SlotId(self.next_slot.max(floor));
        self.next_slot = slot.0 + 1;
        slot
    }

    /// Returns the row at `position`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when `position` is past the end of
    /// the exercise list.
    pub fn slot_at(&self, position: usize) -> Result<&PlanExercise> {
        self.exercises.get(position).ok_or_else(|| {
            PlannerError::invalid_input("position").with_reason(format!(
                "position {} is out of range for a plan with {} exercises",
                position + 1,
                self.exercises.len()
            ))
        })
    }

    /// Whether the given slot is pinned.
    pub fn is_pinned(&self, slot: SlotId) -> bool {
        self.pin_status.get(&slot).copied().unwrap_or(false)
    }

    /// Number of pinned rows currently in the plan.
    pub fn pinned_count(&self) -> usize {
        self.exercises
            .iter()
            .filter(|exercise| self.is_pinned(exercise.slot))
            .count()
    }

    /// Returns a copy of the plan with the row at `position` pinned or
    /// unpinned.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when `position` is out of range.
    pub fn with_pin(&self, position: usize, pinned: bool) -> Result<Plan> {
        let slot = self.slot_at(position)?.slot;
        let mut plan = self.clone();
        if pinned {
            plan.pin_status.insert(slot, true);
        } else {
            plan.pin_status.remove(&slot);
        }
        plan.prune_pins();
        Ok(plan)
    }

    /// Drops pin entries that are false or refer to slots no longer present.
    pub(crate) fn prune_pins(&mut self) {
        let exercises = &self.exercises;
        self.pin_status
            .retain(|slot, pinned| *pinned && exercises.iter().any(|e| e.slot == *slot));
    }

    /// Distinct tags present in the plan, in first-seen order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.exercises.iter().filter_map(PlanExercise::tag) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}
