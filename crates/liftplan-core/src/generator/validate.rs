//! Feasibility checks for quota requests.

use std::collections::HashSet;

use serde::Serialize;

use super::ExercisePool;
use crate::models::{QuotaSpec, QuotaTemplate, TagQuota};

/// Outcome of checking a quota request against the pool.
///
/// Validation never fails; it reports. `messages` lists every problem in
/// quota order, and `feasible` holds the quotas that passed every check so a
/// caller can choose to generate from them anyway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub messages: Vec<String>,
    pub feasible: Vec<TagQuota>,
}

impl ValidationReport {
    fn reject(&mut self, message: String) {
        self.valid = false;
        self.messages.push(message);
    }
}

/// Checks each requested quota against the pool.
///
/// A quota is reported when its tag is blank or repeated, its count is not a
/// positive integer, its tag is missing from the pool, or the pool has fewer
/// exercises than requested.
pub fn validate_quotas(specs: &[QuotaSpec], pool: &ExercisePool) -> ValidationReport {
    let mut report = ValidationReport {
        valid: true,
        ..Default::default()
    };

    if specs.is_empty() {
        report.reject("No quotas provided; add at least one TAG=COUNT quota".to_string());
        return report;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for spec in specs {
        let tag = spec.tag.as_str();

        if tag.trim().is_empty() {
            report.reject("A quota has a blank tag".to_string());
            continue;
        }
        if !seen.insert(tag) {
            report.reject(format!("Tag '{tag}' is listed more than once"));
            continue;
        }

        let Ok(quota) = TagQuota::try_from(spec.clone()) else {
            report.reject(format!(
                "Count for '{tag}' must be a positive integer, got {}",
                spec.count
            ));
            continue;
        };

        let available = pool.available(tag);
        if available == 0 {
            report.reject(format!("No exercises tagged '{tag}' in saved plans"));
            continue;
        }
        if available < quota.count() {
            report.reject(format!(
                "Not enough '{tag}' exercises: need {}, only {available} available",
                quota.count()
            ));
            continue;
        }

        report.feasible.push(quota);
    }

    report
}

/// Checks a saved template's quotas against the pool.
pub fn validate_template(template: &QuotaTemplate, pool: &ExercisePool) -> ValidationReport {
    validate_quotas(&template.quota_specs(), pool)
}
