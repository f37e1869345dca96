//! Quota template persistence.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, types::Type};

use super::classify_error;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{QuotaTemplate, TagQuota},
    store::{QuotaTemplateStore, StorageResult},
};

const SELECT_TEMPLATES_SQL: &str =
    "SELECT id, name, quotas, created_at FROM quota_templates ORDER BY position";
const DELETE_TEMPLATES_SQL: &str = "DELETE FROM quota_templates";
const INSERT_TEMPLATE_SQL: &str = "INSERT INTO quota_templates (id, name, quotas, position, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";

impl super::Database {
    /// Loads all templates in saved order.
    pub fn load_templates(&self) -> Result<Vec<QuotaTemplate>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TEMPLATES_SQL)
            .db_context("Failed to prepare template query")?;

        let templates = stmt
            .query_map([], |row| {
                let quotas: Vec<TagQuota> = serde_json::from_str(&row.get::<_, String>(2)?)
                    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
                let created_at = row
                    .get::<_, String>(3)?
                    .parse::<Timestamp>()
                    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

                Ok(QuotaTemplate {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    quotas,
                    created_at,
                })
            })
            .db_context("Failed to query templates")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read template rows")?;

        Ok(templates)
    }

    /// Replaces every stored template with `templates`, in one transaction.
    pub fn replace_templates(&mut self, templates: &[QuotaTemplate]) -> Result<()> {
        let encoded = templates
            .iter()
            .map(|template| serde_json::to_string(&template.quotas))
            .collect::<serde_json::Result<Vec<_>>>()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_TEMPLATES_SQL, [])
            .db_context("Failed to clear templates")?;

        for (position, (template, quotas)) in templates.iter().zip(&encoded).enumerate() {
            tx.execute(
                INSERT_TEMPLATE_SQL,
                params![
                    template.id,
                    template.name,
                    quotas,
                    position as i64,
                    template.created_at.to_string(),
                ],
            )
            .db_context("Failed to insert template")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Stored {} quota templates", templates.len());
        Ok(())
    }
}

impl QuotaTemplateStore for super::Database {
    fn load(&self) -> Result<Vec<QuotaTemplate>> {
        self.load_templates()
    }

    fn save(&mut self, templates: &[QuotaTemplate]) -> StorageResult {
        match self.replace_templates(templates) {
            Ok(()) => StorageResult::ok(),
            Err(err) => StorageResult::failed(classify_error(&err), err.to_string()),
        }
    }
}
