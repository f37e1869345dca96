//! Data models for plans, exercises and quotas.
//!
//! These are the records the generation engine reads and produces. Display
//! implementations live in [`crate::display::models`] so that data structures
//! and presentation stay separate.
//!
//! # Identity
//!
//! - [`ExerciseKey`] is the `(name, tag)` pair that deduplicates the pool and
//!   drives reroll exclusion.
//! - [`SlotId`] identifies one row inside one plan. Every exercise cloned into
//!   a plan gets a new slot, which is what pins and rerolls address.
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use liftplan_core::models::{Plan, Prescription};
//!
//! let plan = Plan::draft("Push day", Timestamp::now())
//!     .with_exercise("Bench Press", Some("Chest".to_string()), Prescription::new("3", "8", "60kg", "90s"))
//!     .with_exercise("Dips", Some("Chest".to_string()), Prescription::default());
//!
//! assert_eq!(plan.exercises.len(), 2);
//! assert_ne!(plan.exercises[0].slot, plan.exercises[1].slot);
//! println!("{}", plan);
//! ```

pub mod exercise;
pub mod plan;
pub mod quota;
pub mod summary;

#[cfg(test)]
mod tests;

pub use exercise::{Exercise, ExerciseKey, PlanExercise, Prescription, SlotId};
pub use plan::Plan;
pub use quota::{QuotaSpec, QuotaTemplate, TagQuota, MAX_TEMPLATE_NAME_CHARS};
pub use summary::PlanSummary;
