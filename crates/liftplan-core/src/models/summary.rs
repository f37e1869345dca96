//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Plan;

/// Summary information about a plan with exercise statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Name of the plan
    pub name: String,
    /// Whether the plan was generated
    pub is_generated: bool,
    /// Distinct tags in first-seen order
    pub tags: Vec<String>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of exercise rows
    pub total_exercises: u32,
    /// Number of pinned rows
    pub pinned_exercises: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name.clone(),
            is_generated: plan.is_generated,
            tags: plan.tags().into_iter().map(String::from).collect(),
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            total_exercises: plan.exercises.len() as u32,
            pinned_exercises: plan.pinned_count() as u32,
        }
    }
}
