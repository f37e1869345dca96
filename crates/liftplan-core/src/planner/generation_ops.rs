//! Workout generation, reroll and regeneration for the Planner.

use jiff::Timestamp;
use log::{debug, info};
use rand::Rng;

use super::{Generation, Planner};
use crate::{
    error::{PlannerError, Result},
    generator::{self, ExercisePool, GeneratedWorkout, RerollHistory, RerollOutcome, ValidationReport},
    models::{Plan, QuotaSpec},
    params::{GenerateWorkout, Id, RerollSlot},
    store::PlanStore,
};

impl Planner {
    /// Checks `quotas` against the current exercise pool.
    pub async fn validate_quotas(&self, quotas: &[QuotaSpec]) -> Result<ValidationReport> {
        let pool = self.exercise_pool().await?;
        Ok(generator::validate_quotas(quotas, &pool))
    }

    /// Draws a new workout. The result is not stored; pass the plan to
    /// [`Planner::save_generated`] to keep it.
    ///
    /// Template quotas, when a template is named, come first and the directly
    /// entered quotas follow. Only quotas that pass validation are drawn. In
    /// strict mode any validation failure skips the draw entirely.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::TemplateNotFound` for an unknown template.
    pub async fn generate_workout<R>(&self, params: &GenerateWorkout, rng: &mut R) -> Result<Generation>
    where
        R: Rng + ?Sized,
    {
        let mut quotas = match &params.template {
            Some(id) => self.find_template(id).await?.quota_specs(),
            None => Vec::new(),
        };
        quotas.extend(params.quotas.iter().cloned());

        let pool = self.exercise_pool().await?;
        let report = generator::validate_quotas(&quotas, &pool);

        if params.strict && !report.valid {
            debug!("Strict generation rejected: {} warnings", report.messages.len());
            return Ok(Generation {
                report,
                workout: None,
            });
        }

        let workout = generator::generate_workout(&report.feasible, &pool, rng, Timestamp::now());
        Ok(Generation {
            report,
            workout: Some(workout),
        })
    }

    /// Loads a plan and the pool built from every saved plan.
    async fn plan_and_pool(&self, id: u64) -> Result<(Plan, ExercisePool)> {
        let (plan, plans) = self
            .with_database(move |db| {
                let plan = db.get_plan(id)?.ok_or(PlannerError::PlanNotFound { id })?;
                Ok((plan, db.load_plans()?))
            })
            .await?;
        Ok((plan, ExercisePool::from_plans(&plans)))
    }

    /// Rerolls one row of a stored plan and stores the result.
    ///
    /// On [`RerollOutcome::Replaced`] the returned plan is the stored copy
    /// and the returned history should replace `history` for later rerolls.
    /// On [`RerollOutcome::NoAlternative`] nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` for an unknown plan and
    /// `PlannerError::InvalidInput` for a plan that was not generated or an
    /// out-of-range position. Imported plans feed the exercise pool and are
    /// never rewritten here.
    pub async fn reroll_slot<R>(
        &self,
        params: &RerollSlot,
        history: &RerollHistory,
        rng: &mut R,
    ) -> Result<RerollOutcome>
    where
        R: Rng + ?Sized,
    {
        let (plan, pool) = self.plan_and_pool(params.plan_id).await?;

        if !plan.is_generated {
            return Err(PlannerError::invalid_input("plan_id").with_reason(format!(
                "plan {} is not a generated plan and cannot be rerolled",
                plan.id
            )));
        }

        match generator::reroll_slot(&plan, params.position, &pool, history, rng)? {
            RerollOutcome::Replaced {
                plan,
                history,
                previous,
                chosen,
            } => {
                let plan = self.save_generated(&plan).await?;
                info!(
                    "Plan {}: replaced '{}' with '{}' at position {}",
                    plan.id,
                    previous.name,
                    chosen.name,
                    params.position + 1
                );
                Ok(RerollOutcome::Replaced {
                    plan,
                    history,
                    previous,
                    chosen,
                })
            }
            RerollOutcome::NoAlternative => Ok(RerollOutcome::NoAlternative),
        }
    }

    /// Redraws every unpinned row of a generated plan and stores the result.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` for an unknown plan and
    /// `PlannerError::InvalidInput` if the plan carries no quotas.
    pub async fn regenerate_plan<R>(&self, params: &Id, rng: &mut R) -> Result<GeneratedWorkout>
    where
        R: Rng + ?Sized,
    {
        let (plan, pool) = self.plan_and_pool(params.id).await?;

        if plan.quotas.is_empty() {
            return Err(PlannerError::invalid_input("id").with_reason(format!(
                "plan {} was not generated from quotas and cannot be regenerated",
                plan.id
            )));
        }

        let mut workout =
            generator::regenerate_plan(&plan, &plan.quotas, &pool, rng, Timestamp::now());
        workout.plan = self.save_generated(&workout.plan).await?;
        Ok(workout)
    }
}
