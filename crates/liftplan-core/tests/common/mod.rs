#![allow(dead_code)]

use jiff::Timestamp;
use liftplan_core::{
    generator::ExercisePool,
    models::{Plan, Prescription},
    PlannerBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, liftplan_core::Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Builds an unsaved plan whose rows are `(name, tag)` pairs.
pub fn plan_with(name: &str, rows: &[(&str, &str)]) -> Plan {
    rows.iter()
        .fold(Plan::draft(name, Timestamp::now()), |plan, (exercise, tag)| {
            plan.with_exercise(*exercise, Some(tag.to_string()), Prescription::default())
        })
}

/// Builds a pool from a single plan of `(name, tag)` rows.
pub fn pool_of(rows: &[(&str, &str)]) -> ExercisePool {
    ExercisePool::from_plans([&plan_with("Source", rows)])
}
