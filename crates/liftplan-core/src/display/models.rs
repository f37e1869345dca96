//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it through termimad or print
//! it as plain text.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    generator::{ExercisePool, GeneratedWorkout, ValidationReport},
    models::{Plan, PlanExercise, PlanSummary, Prescription, QuotaTemplate, SlotId, TagQuota},
};

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for TagQuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag(), self.count())
    }
}

impl fmt::Display for Prescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            ("sets", &self.sets),
            ("reps", &self.reps),
            ("weight", &self.weight),
            ("rest", &self.rest),
        ];
        let mut first = true;
        for (label, value) in parts {
            if value.trim().is_empty() {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{label} {value}")?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Display for PlanExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**{}**", self.name)?;
        if let Some(tag) = self.tag() {
            write!(f, " [{tag}]")?;
        }
        let prescription = self.prescription.to_string();
        if !prescription.is_empty() {
            write!(f, " - {prescription}")?;
        }
        Ok(())
    }
}

fn write_quotas(f: &mut fmt::Formatter<'_>, quotas: &[TagQuota]) -> fmt::Result {
    let joined = quotas
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    write!(f, "{joined}")
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == 0 {
            writeln!(f, "# {} (unsaved)", self.name)?;
        } else {
            writeln!(f, "# {}. {}", self.id, self.name)?;
        }
        writeln!(f)?;

        if self.is_generated {
            if let Some(generated) = &self.generation_timestamp {
                writeln!(f, "- Generated: {}", LocalDateTime(generated))?;
            }
            if !self.quotas.is_empty() {
                write!(f, "- Quotas: ")?;
                write_quotas(f, &self.quotas)?;
                writeln!(f)?;
            }
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.exercises.is_empty() {
            return writeln!(f, "\nNo exercises in this plan.");
        }

        writeln!(f, "\n## Exercises")?;
        writeln!(f)?;
        for (position, exercise) in self.exercises.iter().enumerate() {
            write!(f, "{}. {exercise}", position + 1)?;
            if self.is_pinned(exercise.slot) {
                write!(f, " 📌")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_generated { " (generated)" } else { "" };
        writeln!(f, "### {}. {}{kind}", self.id, self.name)?;
        writeln!(f)?;
        write!(f, "- Exercises: {}", self.total_exercises)?;
        if self.pinned_exercises > 0 {
            write!(f, " ({} pinned)", self.pinned_exercises)?;
        }
        writeln!(f)?;
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for QuotaTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.name, self.id)?;
        writeln!(f)?;
        write!(f, "- Quotas: ")?;
        write_quotas(f, &self.quotas)?;
        writeln!(f)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for ExercisePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No tagged exercises in saved plans.");
        }

        for (tag, exercises) in self.iter() {
            writeln!(f, "## {tag} ({})", exercises.len())?;
            writeln!(f)?;
            for exercise in exercises {
                writeln!(f, "- {}", exercise.name)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return writeln!(f, "All quotas can be satisfied.");
        }

        writeln!(f, "## Quota warnings")?;
        writeln!(f)?;
        for message in &self.messages {
            writeln!(f, "- {message}")?;
        }
        Ok(())
    }
}

impl fmt::Display for GeneratedWorkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)?;

        if !self.diagnostics.is_empty() {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            for diagnostic in &self.diagnostics {
                writeln!(f, "- {diagnostic}")?;
            }
        }
        Ok(())
    }
}
