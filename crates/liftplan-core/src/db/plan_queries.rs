//! Plan CRUD operations and queries.

use std::collections::BTreeMap;

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row, Transaction};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, PlanExercise, Prescription, SlotId, TagQuota},
    store::PlanStore,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (name, is_generated, generated_at, quotas, next_slot, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET name = ?1, is_generated = ?2, generated_at = ?3, quotas = ?4, next_slot = ?5, updated_at = ?6 WHERE id = ?7";
const PLAN_COLUMNS: &str =
    "id, name, is_generated, generated_at, quotas, next_slot, created_at, updated_at";
const DELETE_PLAN_EXERCISES_SQL: &str = "DELETE FROM plan_exercises WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
const INSERT_EXERCISE_SQL: &str = "INSERT INTO plan_exercises (plan_id, position, slot_id, name, tag, sets, reps, weight, rest, pinned) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_EXERCISES_SQL: &str = "SELECT slot_id, name, tag, sets, reps, weight, rest, pinned FROM plan_exercises WHERE plan_id = ?1 ORDER BY position";

fn parse_timestamp(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Maps a `plans` row; exercises are loaded separately.
fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    let generation_timestamp = row
        .get::<_, Option<String>>(3)?
        .map(|value| {
            value.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })
        })
        .transpose()?;

    let quotas: Vec<TagQuota> = serde_json::from_str(&row.get::<_, String>(4)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        exercises: Vec::new(),
        created_at: parse_timestamp(row, 6)?,
        updated_at: parse_timestamp(row, 7)?,
        is_generated: row.get(2)?,
        generation_timestamp,
        pin_status: BTreeMap::new(),
        quotas,
        next_slot: row.get::<_, i64>(5)? as u64,
    })
}

impl super::Database {
    /// Stores a new plan and returns it with its assigned ID.
    ///
    /// The plan's `id` field is ignored. `updated_at` is set to now.
    pub fn insert_plan(&mut self, plan: &Plan) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let stored = Self::insert_in(&tx, plan, Timestamp::now())?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(stored)
    }

    /// Stores several plans in one transaction.
    ///
    /// Either every plan is stored or, on the first failure, none is.
    pub fn insert_plans(&mut self, plans: &[Plan]) -> Result<Vec<Plan>> {
        let now = Timestamp::now();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let stored = plans
            .iter()
            .map(|plan| Self::insert_in(&tx, plan, now))
            .collect::<Result<Vec<_>>>()?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(stored)
    }

    fn insert_in(tx: &Transaction<'_>, plan: &Plan, now: Timestamp) -> Result<Plan> {
        let quotas = serde_json::to_string(&plan.quotas)?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                plan.name,
                plan.is_generated,
                plan.generation_timestamp.map(|ts| ts.to_string()),
                quotas,
                plan.next_slot as i64,
                plan.created_at.to_string(),
                now.to_string(),
            ],
        )
        .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid() as u64;
        Self::write_exercises(tx, id, plan)?;

        let mut stored = plan.clone();
        stored.id = id;
        stored.updated_at = now;
        stored.prune_pins();
        Ok(stored)
    }

    /// Overwrites an existing plan, including all exercise rows and pins.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if no plan has `plan.id`.
    pub fn update_plan(&mut self, plan: &Plan) -> Result<Plan> {
        let quotas = serde_json::to_string(&plan.quotas)?;
        let now = Timestamp::now();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let updated = tx
            .execute(
                UPDATE_PLAN_SQL,
                params![
                    plan.name,
                    plan.is_generated,
                    plan.generation_timestamp.map(|ts| ts.to_string()),
                    quotas,
                    plan.next_slot as i64,
                    now.to_string(),
                    plan.id as i64,
                ],
            )
            .db_context("Failed to update plan")?;

        if updated == 0 {
            return Err(PlannerError::PlanNotFound { id: plan.id });
        }

        tx.execute(DELETE_PLAN_EXERCISES_SQL, params![plan.id as i64])
            .db_context("Failed to clear plan exercises")?;
        Self::write_exercises(&tx, plan.id, plan)?;

        tx.commit().db_context("Failed to commit transaction")?;

        let mut stored = plan.clone();
        stored.updated_at = now;
        stored.prune_pins();
        Ok(stored)
    }

    fn write_exercises(tx: &Transaction<'_>, plan_id: u64, plan: &Plan) -> Result<()> {
        let mut stmt = tx
            .prepare(INSERT_EXERCISE_SQL)
            .db_context("Failed to prepare exercise insert")?;

        for (position, exercise) in plan.exercises.iter().enumerate() {
            stmt.execute(params![
                plan_id as i64,
                position as i64,
                exercise.slot.0 as i64,
                exercise.name,
                exercise.tag,
                exercise.prescription.sets,
                exercise.prescription.reps,
                exercise.prescription.weight,
                exercise.prescription.rest,
                plan.is_pinned(exercise.slot),
            ])
            .db_context("Failed to insert plan exercise")?;
        }

        Ok(())
    }

    /// Retrieves a plan by its ID, with exercises and pins loaded.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let mut plan = self
            .connection
            .query_row(
                &format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"),
                params![id as i64],
                plan_from_row,
            )
            .optional()
            .db_context("Failed to query plan")?;

        if let Some(ref mut plan) = plan {
            self.load_exercises(plan)?;
        }

        Ok(plan)
    }

    /// Lists all plans in creation order, with exercises loaded.
    pub fn list_plans(&self) -> Result<Vec<Plan>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {PLAN_COLUMNS} FROM plans ORDER BY id"))
            .db_context("Failed to prepare query")?;

        let mut plans = stmt
            .query_map([], plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan rows")?;

        for plan in &mut plans {
            self.load_exercises(plan)?;
        }

        Ok(plans)
    }

    fn load_exercises(&self, plan: &mut Plan) -> Result<()> {
        let mut stmt = self
            .connection
            .prepare(SELECT_EXERCISES_SQL)
            .db_context("Failed to prepare exercise query")?;

        let rows = stmt
            .query_map(params![plan.id as i64], |row| {
                let exercise = PlanExercise {
                    slot: SlotId(row.get::<_, i64>(0)? as u64),
                    name: row.get(1)?,
                    tag: row.get(2)?,
                    prescription: Prescription {
                        sets: row.get(3)?,
                        reps: row.get(4)?,
                        weight: row.get(5)?,
                        rest: row.get(6)?,
                    },
                };
                let pinned: bool = row.get(7)?;
                Ok((exercise, pinned))
            })
            .db_context("Failed to query plan exercises")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan exercises")?;

        for (exercise, pinned) in rows {
            if pinned {
                plan.pin_status.insert(exercise.slot, true);
            }
            plan.exercises.push(exercise);
        }

        Ok(())
    }

    /// Permanently deletes a plan and its exercise rows.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_PLAN_EXERCISES_SQL, params![id as i64])
            .db_context("Failed to delete plan exercises")?;
        let deleted = tx
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        if deleted == 0 {
            return Err(PlannerError::PlanNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}

impl PlanStore for super::Database {
    fn load_plans(&self) -> Result<Vec<Plan>> {
        self.list_plans()
    }
}
