//! Collection wrappers for displaying lists of plans and templates.

use std::fmt;

use crate::models::{PlanSummary, QuotaTemplate};

/// Newtype wrapper for displaying plan summaries.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use liftplan_core::{
///     display::PlanSummaries,
///     models::{Plan, PlanSummary, Prescription},
/// };
///
/// let mut plan = Plan::draft("Push day", Timestamp::now())
///     .with_exercise("Bench Press", Some("Chest".into()), Prescription::default());
/// plan.id = 1;
///
/// let output = PlanSummaries(vec![PlanSummary::from(&plan)]).to_string();
/// assert!(output.contains("1. Push day"));
/// assert!(output.contains("Tags: Chest"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying quota templates.
pub struct Templates(pub Vec<QuotaTemplate>);

impl Templates {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuotaTemplate> {
        self.0.iter()
    }
}

impl fmt::Display for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No quota templates saved.");
        }
        for template in &self.0 {
            write!(f, "{template}")?;
        }
        Ok(())
    }
}
