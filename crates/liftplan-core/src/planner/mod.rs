//! High-level async API over the plan store and the generation engine.
//!
//! [`Planner`] owns nothing but the database path. Each operation opens the
//! database on a blocking thread, loads what it needs, runs the synchronous
//! engine on the caller's task with the caller's random source, and writes
//! the result back.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   plan_ops /    │    │    generator    │    │    Database     │
//! │ generation_ops /│───▶│  (sync, pure)   │    │ (spawn_blocking)│
//! │  template_ops   │───────────────────────────▶│                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: [`PlannerBuilder`], database path configuration
//! - [`plan_ops`]: import, list, show, delete, pin, pool
//! - [`generation_ops`]: validate, generate, reroll, regenerate
//! - [`template_ops`]: quota template management
//!
//! # Examples
//!
//! ```rust,no_run
//! use liftplan_core::{models::QuotaSpec, params::GenerateWorkout, PlannerBuilder};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("liftplan.db"))
//!     .build()
//!     .await?;
//!
//! let mut rng = StdRng::from_os_rng();
//! let generation = planner
//!     .generate_workout(
//!         &GenerateWorkout {
//!             quotas: vec![QuotaSpec::new("Chest", 2), QuotaSpec::new("Back", 2)],
//!             ..Default::default()
//!         },
//!         &mut rng,
//!     )
//!     .await?;
//!
//! if let Some(workout) = generation.workout {
//!     let saved = planner.save_generated(&workout.plan).await?;
//!     println!("{saved}");
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{PlannerError, Result},
    generator::{GeneratedWorkout, ValidationReport},
    models::QuotaTemplate,
    store::StorageResult,
};

pub mod builder;
pub mod generation_ops;
pub mod plan_ops;
pub mod template_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

/// Outcome of [`Planner::generate_workout`].
#[derive(Debug, Clone)]
pub struct Generation {
    /// Validation of the requested quotas
    pub report: ValidationReport,
    /// The drawn workout; `None` only when strict mode rejected the request
    pub workout: Option<GeneratedWorkout>,
}

/// Outcome of a template write, with the template it concerns.
#[derive(Debug, Clone)]
pub struct TemplateWrite {
    pub template: QuotaTemplate,
    pub storage: StorageResult,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the SQLite database backing this planner.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a freshly opened database on a blocking thread.
    pub(crate) async fn with_database<F, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }
}
