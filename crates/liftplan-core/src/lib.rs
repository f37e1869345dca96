//! Core library for the Liftplan workout planner.
//!
//! The crate has two layers:
//!
//! - [`generator`]: a synchronous, I/O-free engine that builds a tag-indexed
//!   exercise pool from saved plans, validates per-tag quotas, draws random
//!   workouts, rerolls single slots with a short history, and regenerates
//!   plans around pinned rows.
//! - [`Planner`]: an async facade that loads saved plans and quota templates
//!   from SQLite ([`db`]), feeds them to the engine and stores the results.
//!
//! Domain models implement [`std::fmt::Display`] as markdown; [`display`]
//! adds wrappers for collections and operation results.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use liftplan_core::{
//!     models::QuotaSpec,
//!     params::{GenerateWorkout, ImportPlans},
//!     PlannerBuilder,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("liftplan.db"))
//!     .build()
//!     .await?;
//!
//! let plans: ImportPlans = serde_json::from_str(
//!     r#"{"name": "Push", "exercises": [{"name": "Bench Press", "tag": "Chest"}]}"#,
//! )?;
//! planner.import_plans(plans).await?;
//!
//! let mut rng = StdRng::from_os_rng();
//! let params = GenerateWorkout {
//!     quotas: vec![QuotaSpec::new("Chest", 1)],
//!     ..Default::default()
//! };
//! let generation = planner.generate_workout(&params, &mut rng).await?;
//! print!("{}", generation.report);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod generator;
pub mod models;
pub mod params;
pub mod planner;
pub mod store;

pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, OperationStatus, PlanSummaries, Templates,
    UpdateResult,
};
pub use error::{PlannerError, Result};
pub use models::{
    Exercise, ExerciseKey, Plan, PlanExercise, PlanSummary, Prescription, QuotaSpec,
    QuotaTemplate, SlotId, TagQuota,
};
pub use planner::{Generation, Planner, PlannerBuilder, TemplateWrite};
pub use store::{PlanStore, QuotaTemplateStore, StorageErrorKind, StorageResult};
