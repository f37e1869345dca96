//! Pin-aware regeneration of a generated plan.

use std::collections::HashSet;

use jiff::Timestamp;
use log::debug;
use rand::Rng;

use super::{draw_without_replacement, ExercisePool, GeneratedWorkout, GenerationDiagnostic, Shortfall};
use crate::models::{Exercise, ExerciseKey, Plan, PlanExercise, TagQuota};

/// Redraws the unpinned slots of `plan` against `quotas`.
///
/// Pinned rows keep their slot, position and content. For each quota the
/// number of rows still to draw is the quota count minus the pinned rows of
/// that tag:
///
/// - when nothing remains to draw, the tag is not redrawn and every row of
///   that tag is left as is, unpinned ones included;
/// - otherwise the tag is redrawn: new exercises are drawn without
///   replacement, excluding every exercise pinned anywhere in the plan. They
///   overwrite the unpinned rows of that tag in place, surplus unpinned rows
///   of that tag are removed, and surplus draws are appended at the end.
///
/// A redrawn tag therefore ends with exactly its pinned rows plus the new
/// draws, so on a shortfall the old unpinned rows do not linger beside
/// fresh ones. A tag that is not redrawn keeps all of its rows.
///
/// Rows whose tag has no quota are never touched.
pub fn regenerate_plan<R>(
    plan: &Plan,
    quotas: &[TagQuota],
    pool: &ExercisePool,
    rng: &mut R,
    now: Timestamp,
) -> GeneratedWorkout
where
    R: Rng + ?Sized,
{
    let mut next = plan.clone();
    next.prune_pins();

    let pinned: HashSet<ExerciseKey> = next
        .exercises
        .iter()
        .filter(|row| next.is_pinned(row.slot))
        .filter_map(PlanExercise::key)
        .collect();

    let mut diagnostics = Vec::new();
    if quotas.is_empty() {
        diagnostics.push(GenerationDiagnostic::EmptyQuotas);
    }

    for quota in quotas {
        let tag = quota.tag();
        let pinned_here = next
            .exercises
            .iter()
            .filter(|row| row.has_tag(tag) && next.is_pinned(row.slot))
            .count();
        let remaining = quota.count().saturating_sub(pinned_here);
        if remaining == 0 {
            debug!("'{tag}' is saturated by {pinned_here} pinned exercises");
            continue;
        }

        let candidates: Vec<&Exercise> = pool
            .get(tag)
            .iter()
            .filter(|exercise| !pinned.contains(&exercise.key()))
            .collect();
        if let Some(shortfall) = Shortfall::check(tag, remaining, candidates.len()) {
            debug!(
                "Shortfall for '{}': needed {}, available {}",
                shortfall.tag, shortfall.needed, shortfall.available
            );
            diagnostics.push(GenerationDiagnostic::Shortfall(shortfall));
        }
        let mut drawn = draw_without_replacement(&candidates, remaining, rng).into_iter();

        let open: Vec<usize> = next
            .exercises
            .iter()
            .enumerate()
            .filter(|(_, row)| row.has_tag(tag) && !next.is_pinned(row.slot))
            .map(|(position, _)| position)
            .collect();

        let mut vacated: HashSet<usize> = HashSet::new();
        for position in open {
            match drawn.next() {
                Some(source) => {
                    let slot = next.allocate_slot();
                    next.exercises[position] = PlanExercise::from_exercise(source, slot);
                }
                None => {
                    vacated.insert(position);
                }
            }
        }

        for source in drawn {
            let slot = next.allocate_slot();
            next.exercises.push(PlanExercise::from_exercise(source, slot));
        }

        if !vacated.is_empty() {
            next.exercises = next
                .exercises
                .into_iter()
                .enumerate()
                .filter(|(position, _)| !vacated.contains(position))
                .map(|(_, row)| row)
                .collect();
        }
    }

    next.prune_pins();
    next.is_generated = true;
    next.generation_timestamp = Some(now);
    next.updated_at = now;
    next.quotas = quotas.to_vec();

    debug!(
        "Regenerated '{}': {} exercises, {} pinned",
        next.name,
        next.exercises.len(),
        next.pinned_count()
    );

    GeneratedWorkout {
        plan: next,
        diagnostics,
    }
}
