//! Random draw primitive and generation diagnostics.

use std::fmt;

use rand::{seq::index, Rng};
use serde::Serialize;

use crate::models::Plan;

/// Draws `count` items uniformly at random without replacement.
///
/// Returns `min(count, candidates.len())` items in draw order.
pub fn draw_without_replacement<T, R>(candidates: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let amount = count.min(candidates.len());
    index::sample(rng, candidates.len(), amount)
        .into_iter()
        .map(|i| candidates[i].clone())
        .collect()
}

/// A tag for which fewer exercises were available than requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub tag: String,
    pub needed: usize,
    pub available: usize,
}

impl Shortfall {
    /// Returns a shortfall when `available` cannot cover `needed`.
    pub(crate) fn check(tag: &str, needed: usize, available: usize) -> Option<Self> {
        (available < needed).then(|| Self {
            tag: tag.to_string(),
            needed,
            available,
        })
    }
}

/// Non-fatal notes produced while generating or regenerating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationDiagnostic {
    /// The quota list was empty, so nothing was drawn
    EmptyQuotas,

    /// A tag could not be filled completely
    Shortfall(Shortfall),
}

impl fmt::Display for GenerationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationDiagnostic::EmptyQuotas => {
                write!(f, "No quotas given; the plan has no exercises")
            }
            GenerationDiagnostic::Shortfall(Shortfall {
                tag,
                needed,
                available,
            }) => write!(
                f,
                "Only {available} of {needed} requested '{tag}' exercises were available"
            ),
        }
    }
}

/// A generated or regenerated plan together with its diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedWorkout {
    pub plan: Plan,
    pub diagnostics: Vec<GenerationDiagnostic>,
}

impl GeneratedWorkout {
    /// Shortfalls among the diagnostics, in quota order.
    pub fn shortfalls(&self) -> impl Iterator<Item = &Shortfall> {
        self.diagnostics.iter().filter_map(|diagnostic| match diagnostic {
            GenerationDiagnostic::Shortfall(shortfall) => Some(shortfall),
            GenerationDiagnostic::EmptyQuotas => None,
        })
    }
}
