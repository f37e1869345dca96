//! Result wrappers that pair a confirmation line with the affected resource.

use std::fmt;

use crate::models::{Plan, QuotaTemplate};

/// Wrapper for displaying a newly stored resource.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use liftplan_core::{display::CreateResult, models::Plan};
///
/// let mut plan = Plan::draft("Leg day", Timestamp::now());
/// plan.id = 7;
///
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.starts_with("Saved plan with ID: 7"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<QuotaTemplate> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved template with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper for displaying a modified resource along with what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper for displaying a deletion confirmation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<QuotaTemplate> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted template '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{Prescription, TagQuota};

    #[test]
    fn test_update_result_lists_changes() {
        let mut plan = Plan::draft("Push day", Timestamp::now()).with_exercise(
            "Bench Press",
            Some("Chest".into()),
            Prescription::new("3", "8", "60kg", "90s"),
        );
        plan.id = 3;

        let output =
            UpdateResult::with_changes(plan, vec!["Rerolled position 1".to_string()]).to_string();
        assert!(output.starts_with("Updated plan with ID: 3"));
        assert!(output.contains("Changes made:\n- Rerolled position 1"));
        assert!(output.contains("1. **Bench Press** [Chest] - sets 3, reps 8, weight 60kg, rest 90s"));
    }

    #[test]
    fn test_delete_result_names_template() {
        let template = QuotaTemplate::new(
            "tpl-1",
            "Upper",
            vec![TagQuota::new("Back", 2).unwrap()],
            Timestamp::now(),
        )
        .unwrap();

        assert_eq!(
            DeleteResult::new(template).to_string(),
            "Deleted template 'Upper' (ID: tpl-1)\n"
        );
    }
}
