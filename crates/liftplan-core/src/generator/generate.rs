//! Quota-constrained random workout generation.

use jiff::Timestamp;
use log::debug;
use rand::Rng;

use super::{draw_without_replacement, ExercisePool, GeneratedWorkout, GenerationDiagnostic, Shortfall};
use crate::models::{Exercise, Plan, PlanExercise, TagQuota};

/// Name given to freshly generated plans.
pub fn generated_plan_name(now: Timestamp) -> String {
    format!("Generated Workout {}", now.strftime("%Y-%m-%d"))
}

/// Draws a new plan from the pool.
///
/// For each quota, in order, `min(count, available)` exercises of that tag
/// are drawn without replacement and appended to the plan, each in a fresh
/// slot. Tags that cannot be filled produce a [`Shortfall`] diagnostic; an
/// empty quota list produces an empty plan and
/// [`GenerationDiagnostic::EmptyQuotas`].
pub fn generate_workout<R>(
    quotas: &[TagQuota],
    pool: &ExercisePool,
    rng: &mut R,
    now: Timestamp,
) -> GeneratedWorkout
where
    R: Rng + ?Sized,
{
    let mut plan = Plan::draft(generated_plan_name(now), now);
    plan.is_generated = true;
    plan.generation_timestamp = Some(now);
    plan.quotas = quotas.to_vec();

    let mut diagnostics = Vec::new();
    if quotas.is_empty() {
        diagnostics.push(GenerationDiagnostic::EmptyQuotas);
    }

    for quota in quotas {
        let candidates: Vec<&Exercise> = pool.get(quota.tag()).iter().collect();
        let drawn = draw_without_replacement(&candidates, quota.count(), rng);

        if let Some(shortfall) = Shortfall::check(quota.tag(), quota.count(), candidates.len()) {
            debug!(
                "Shortfall for '{}': needed {}, available {}",
                shortfall.tag, shortfall.needed, shortfall.available
            );
            diagnostics.push(GenerationDiagnostic::Shortfall(shortfall));
        }

        for source in drawn {
            let slot = plan.allocate_slot();
            plan.exercises.push(PlanExercise::from_exercise(source, slot));
        }
    }

    debug!(
        "Generated '{}' with {} exercises from {} quotas",
        plan.name,
        plan.exercises.len(),
        quotas.len()
    );

    GeneratedWorkout { plan, diagnostics }
}
