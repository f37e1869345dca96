//! Parameter structures for planner operations.
//!
//! These are plain data carriers shared by every front end. The CLI defines
//! its own clap `Args` structs and converts them into these with `From`, so
//! the core stays free of argument-parsing dependencies.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Planner      │
//! │  (clap derives) │───▶│ (serde derives) │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::{Plan, Prescription, QuotaSpec};

/// Parameters for operations that only need a plan ID.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Id {
    pub id: u64,
}

/// Parameters for deleting a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeletePlan {
    pub id: u64,
    /// Must be true; deletion is permanent
    #[serde(default)]
    pub confirmed: bool,
}

/// One exercise row in an imported plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub prescription: Prescription,
}

/// A plan as written in an import file.
///
/// ```json
/// {
///   "name": "Push day",
///   "exercises": [
///     { "name": "Bench Press", "tag": "Chest", "sets": "3", "reps": "8" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlan {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<NewExercise>,
}

impl NewPlan {
    /// Builds an unsaved plan, giving each row its own slot.
    pub fn into_plan(self, now: Timestamp) -> Plan {
        self.exercises
            .into_iter()
            .fold(Plan::draft(self.name.trim(), now), |plan, exercise| {
                plan.with_exercise(exercise.name.trim(), exercise.tag, exercise.prescription)
            })
    }
}

/// Parameters for importing plans.
///
/// Deserializes from either a single plan object or an array of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportPlans {
    Many(Vec<NewPlan>),
    One(NewPlan),
}

impl ImportPlans {
    pub fn into_plans(self) -> Vec<NewPlan> {
        match self {
            ImportPlans::Many(plans) => plans,
            ImportPlans::One(plan) => vec![plan],
        }
    }
}

/// Parameters for generating a workout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateWorkout {
    /// Quotas entered directly, appended after any template quotas
    #[serde(default)]
    pub quotas: Vec<QuotaSpec>,
    /// Template whose quotas are used
    #[serde(default)]
    pub template: Option<String>,
    /// Skip generation when any quota fails validation
    #[serde(default)]
    pub strict: bool,
}

/// Parameters for pinning or unpinning one row. `position` is 0-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinSlot {
    pub plan_id: u64,
    pub position: usize,
    pub pinned: bool,
}

/// Parameters for rerolling one row. `position` is 0-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RerollSlot {
    pub plan_id: u64,
    pub position: usize,
}

/// Parameters for saving a new quota template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTemplate {
    pub name: String,
    pub quotas: Vec<QuotaSpec>,
}

/// Parameters for operations addressing one template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateId {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_accepts_single_plan_or_list() {
        let one: ImportPlans =
            serde_json::from_str(r#"{"name":"Legs","exercises":[{"name":"Squat","tag":"Legs"}]}"#)
                .unwrap();
        assert_eq!(one.into_plans().len(), 1);

        let many: ImportPlans =
            serde_json::from_str(r#"[{"name":"A"},{"name":"B","exercises":[]}]"#).unwrap();
        assert_eq!(many.into_plans().len(), 2);
    }

    #[test]
    fn test_new_plan_into_plan() {
        let new_plan: NewPlan = serde_json::from_str(
            r#"{"name":" Push ","exercises":[
                {"name":"Bench Press","tag":"Chest","sets":"3","reps":"8","weight":"60kg","rest":"90s"},
                {"name":"Warm-up"}
            ]}"#,
        )
        .unwrap();

        let plan = new_plan.into_plan(Timestamp::now());
        assert_eq!(plan.name, "Push");
        assert_eq!(plan.exercises.len(), 2);
        assert_eq!(plan.exercises[0].prescription.weight, "60kg");
        assert_eq!(plan.exercises[1].tag(), None);
        assert_ne!(plan.exercises[0].slot, plan.exercises[1].slot);
    }
}
