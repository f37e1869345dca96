//! Plan operations for the Planner.

use jiff::Timestamp;
use log::info;

use super::Planner;
use crate::{
    display::PlanSummaries,
    error::{PlannerError, Result},
    generator::ExercisePool,
    models::{Plan, PlanSummary},
    params::{DeletePlan, Id, ImportPlans, PinSlot},
    store::PlanStore,
};

impl Planner {
    /// Stores every plan in `params` and returns them with their new IDs.
    ///
    /// The batch is written in a single transaction, so a failed import
    /// leaves no plans behind.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if a plan or exercise name is
    /// blank; nothing is stored in that case.
    pub async fn import_plans(&self, params: ImportPlans) -> Result<Vec<Plan>> {
        let now = Timestamp::now();
        let plans = params
            .into_plans()
            .into_iter()
            .map(|new_plan| new_plan.into_plan(now))
            .collect::<Vec<_>>();

        for plan in &plans {
            if plan.name.is_empty() {
                return Err(PlannerError::invalid_input("name").with_reason("plan name must not be blank"));
            }
            if plan.exercises.iter().any(|exercise| exercise.name.is_empty()) {
                return Err(PlannerError::invalid_input("exercises").with_reason(format!(
                    "plan '{}' has an exercise without a name",
                    plan.name
                )));
            }
        }

        let stored = self.with_database(move |db| db.insert_plans(&plans)).await?;

        info!("Imported {} plans", stored.len());
        Ok(stored)
    }

    /// Retrieves a plan by its ID, with exercises and pins loaded.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let id = params.id;
        self.with_database(move |db| db.get_plan(id)).await
    }

    /// Retrieves a plan, treating a missing plan as an error.
    pub(crate) async fn require_plan(&self, id: u64) -> Result<Plan> {
        self.get_plan(&Id { id })
            .await?
            .ok_or(PlannerError::PlanNotFound { id })
    }

    /// Lists every saved plan as a summary.
    pub async fn list_plans(&self) -> Result<PlanSummaries> {
        let plans = self.with_database(|db| db.list_plans()).await?;
        Ok(PlanSummaries(plans.iter().map(PlanSummary::from).collect()))
    }

    /// Permanently deletes a plan and returns what was deleted.
    ///
    /// Returns `Ok(None)` if the plan does not exist.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `confirmed` is false.
    pub async fn delete_plan_with_confirmation(&self, params: &DeletePlan) -> Result<Option<Plan>> {
        if !params.confirmed {
            return Err(PlannerError::invalid_input("confirmed").with_reason(
                "Plan deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let id = params.id;
        self.with_database(move |db| {
            let Some(plan) = db.get_plan(id)? else {
                return Ok(None);
            };
            db.delete_plan(id)?;
            Ok(Some(plan))
        })
        .await
    }

    /// Builds the exercise pool from every saved plan.
    pub async fn exercise_pool(&self) -> Result<ExercisePool> {
        let plans = self.with_database(|db| db.load_plans()).await?;
        Ok(ExercisePool::from_plans(&plans))
    }

    /// Stores a plan: inserted when it has no ID yet, overwritten otherwise.
    pub async fn save_generated(&self, plan: &Plan) -> Result<Plan> {
        let plan = plan.clone();
        self.with_database(move |db| {
            if plan.id == 0 {
                db.insert_plan(&plan)
            } else {
                db.update_plan(&plan)
            }
        })
        .await
    }

    /// Pins or unpins the row at `params.position` and stores the plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` for an unknown plan and
    /// `PlannerError::InvalidInput` for an out-of-range position.
    pub async fn set_pin(&self, params: &PinSlot) -> Result<Plan> {
        let plan = self.require_plan(params.plan_id).await?;
        let updated = plan.with_pin(params.position, params.pinned)?;
        self.save_generated(&updated).await
    }
}
