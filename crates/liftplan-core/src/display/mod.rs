//! Markdown formatting for plans, templates and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! Collections and operation outcomes go through the newtype wrappers here so
//! every caller prints the same confirmation lines.
//!
//! ```text
//! Plan / QuotaTemplate ──▶ CreateResult | UpdateResult | DeleteResult ──▶ markdown
//! Vec<PlanSummary>     ──▶ PlanSummaries                              ──▶ markdown
//! ```
//!
//! # Examples
//!
//! ```rust
//! use liftplan_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Pinned position 2".to_string());
//! assert_eq!(status.to_string(), "Success: Pinned position 2\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{PlanSummaries, Templates};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
