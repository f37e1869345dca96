//! Random workout generation engine.
//!
//! Everything in this module is synchronous and free of I/O. Each operation
//! takes its inputs by reference and returns new values; callers adopt the
//! returned plan and history instead of patching old copies.
//!
//! ```text
//! saved plans ─▶ ExercisePool::from_plans ─▶ pool
//! quotas + pool ─▶ validate_quotas ─▶ ValidationReport { feasible, .. }
//! feasible + pool ─▶ generate_workout ─▶ GeneratedWorkout
//! plan + pool ─▶ reroll_slot | regenerate_plan ─▶ updated plan
//! ```
//!
//! Randomness is always injected: every drawing function is generic over
//! [`rand::Rng`], so a seeded `StdRng` gives reproducible plans.
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use liftplan_core::{
//!     generator::{generate_workout, validate_quotas, ExercisePool},
//!     models::{Plan, Prescription, QuotaSpec},
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let saved = Plan::draft("Push day", Timestamp::now())
//!     .with_exercise("Bench Press", Some("Chest".into()), Prescription::default())
//!     .with_exercise("Dips", Some("Chest".into()), Prescription::default());
//! let pool = ExercisePool::from_plans([&saved]);
//!
//! let report = validate_quotas(&[QuotaSpec::new("Chest", 1)], &pool);
//! assert!(report.valid);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let workout = generate_workout(&report.feasible, &pool, &mut rng, Timestamp::now());
//! assert_eq!(workout.plan.exercises.len(), 1);
//! ```

pub mod draw;
pub mod generate;
pub mod history;
pub mod pool;
pub mod regenerate;
pub mod reroll;
pub mod validate;

pub use draw::{draw_without_replacement, GeneratedWorkout, GenerationDiagnostic, Shortfall};
pub use generate::{generate_workout, generated_plan_name};
pub use history::{RerollHistory, DEFAULT_HISTORY_WINDOW};
pub use pool::ExercisePool;
pub use regenerate::regenerate_plan;
pub use reroll::{reroll_slot, RerollOutcome};
pub use validate::{validate_quotas, validate_template, ValidationReport};
