//! Single-slot reroll with history-aware exclusion.

use log::debug;
use rand::{seq::IndexedRandom, Rng};

use super::{ExercisePool, RerollHistory};
use crate::{
    error::Result,
    models::{Exercise, ExerciseKey, Plan, PlanExercise},
};

/// Result of rerolling one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum RerollOutcome {
    /// The slot now shows a different exercise.
    Replaced {
        /// Plan with the slot replaced
        plan: Plan,
        /// History with the replaced exercise recorded
        history: RerollHistory,
        /// Exercise that was shown before
        previous: ExerciseKey,
        /// Exercise now shown
        chosen: ExerciseKey,
    },

    /// Every candidate for the slot's tag is excluded; nothing changed.
    NoAlternative,
}

/// Replaces the exercise at `position` with another one of the same tag.
///
/// Candidates are the pool entries for the slot's tag, minus the exercise
/// currently shown and minus the keys in that position's history window.
/// The replacement gets a fresh slot but keeps the sets, reps, weight and
/// rest of the row it replaces. When no candidate is left, or the row has no
/// tag, [`RerollOutcome::NoAlternative`] is returned and the inputs are
/// untouched.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` when `position` is out of range.
pub fn reroll_slot<R>(
    plan: &Plan,
    position: usize,
    pool: &ExercisePool,
    history: &RerollHistory,
    rng: &mut R,
) -> Result<RerollOutcome>
where
    R: Rng + ?Sized,
{
    let current = plan.slot_at(position)?;
    let Some(previous) = current.key() else {
        debug!("Slot {position} has no tag; nothing to reroll");
        return Ok(RerollOutcome::NoAlternative);
    };

    let candidates: Vec<&Exercise> = pool
        .get(&previous.tag)
        .iter()
        .filter(|exercise| !exercise.is(&previous) && !history.contains(position, &exercise.key()))
        .collect();

    let Some(source) = candidates.choose(rng).copied() else {
        debug!(
            "No alternative for '{}' at slot {position} ({} excluded by history)",
            previous.name,
            history.recent(position).count()
        );
        return Ok(RerollOutcome::NoAlternative);
    };

    let mut next = plan.clone();
    let slot = next.allocate_slot();
    next.exercises[position] = PlanExercise {
        slot,
        name: source.name.clone(),
        tag: Some(source.tag.clone()),
        prescription: current.prescription.clone(),
    };
    next.prune_pins();

    debug!(
        "Rerolled slot {position}: '{}' -> '{}' ({} candidates)",
        previous.name,
        source.name,
        candidates.len()
    );

    Ok(RerollOutcome::Replaced {
        plan: next,
        history: history.record(position, previous.clone()),
        previous,
        chosen: source.key(),
    })
}
