//! Quota template operations for the Planner.

use jiff::Timestamp;

use super::{Planner, TemplateWrite};
use crate::{
    display::Templates,
    error::{PlannerError, Result},
    generator::{self, ValidationReport},
    models::{QuotaSpec, QuotaTemplate, TagQuota},
    params::{SaveTemplate, TemplateId},
    store::{load_templates_or_empty, save_templates_checked},
};

/// Picks a fresh id derived from the creation time.
fn next_template_id(existing: &[QuotaTemplate], now: Timestamp) -> String {
    let base = format!("tpl-{}", now.as_millisecond());
    let taken = |id: &str| existing.iter().any(|template| template.id == id);

    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

impl Planner {
    /// Lists saved templates. A store that cannot be read yields an empty
    /// list.
    pub async fn list_templates(&self) -> Result<Templates> {
        let templates = self.with_database(|db| Ok(load_templates_or_empty(&*db))).await?;
        Ok(Templates(templates))
    }

    pub(crate) async fn find_template(&self, id: &str) -> Result<QuotaTemplate> {
        self.list_templates()
            .await?
            .0
            .into_iter()
            .find(|template| template.id == id)
            .ok_or_else(|| PlannerError::TemplateNotFound { id: id.to_string() })
    }

    /// Validates and stores a new template.
    ///
    /// A store failure is reported in [`TemplateWrite::storage`], not raised.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for a malformed name or quota; the
    /// store is not touched in that case.
    pub async fn save_template(&self, params: &SaveTemplate) -> Result<TemplateWrite> {
        let quotas = params
            .quotas
            .iter()
            .cloned()
            .map(TagQuota::try_from)
            .collect::<Result<Vec<_>>>()?;
        let name = params.name.clone();

        self.with_database(move |db| {
            let mut templates = db.load_templates()?;
            let now = Timestamp::now();
            let template = QuotaTemplate::new(next_template_id(&templates, now), &name, quotas, now)?;

            templates.push(template.clone());
            let storage = save_templates_checked(db, &templates)?;
            Ok(TemplateWrite { template, storage })
        })
        .await
    }

    /// Removes a template.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::TemplateNotFound` for an unknown id.
    pub async fn delete_template(&self, params: &TemplateId) -> Result<TemplateWrite> {
        let id = params.id.clone();

        self.with_database(move |db| {
            let mut templates = db.load_templates()?;
            let index = templates
                .iter()
                .position(|template| template.id == id)
                .ok_or_else(|| PlannerError::TemplateNotFound { id: id.clone() })?;

            let template = templates.remove(index);
            let storage = save_templates_checked(db, &templates)?;
            Ok(TemplateWrite { template, storage })
        })
        .await
    }

    /// Returns a template's quotas in entry order.
    pub async fn template_quotas(&self, params: &TemplateId) -> Result<Vec<QuotaSpec>> {
        Ok(self.find_template(&params.id).await?.quota_specs())
    }

    /// Checks a template against the current exercise pool.
    pub async fn check_template(&self, params: &TemplateId) -> Result<(QuotaTemplate, ValidationReport)> {
        let template = self.find_template(&params.id).await?;
        let pool = self.exercise_pool().await?;
        let report = generator::validate_template(&template, &pool);
        Ok((template, report))
    }
}
