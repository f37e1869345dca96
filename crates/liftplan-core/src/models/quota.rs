//! Quota and quota template models.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Maximum length of a template name, in characters.
pub const MAX_TEMPLATE_NAME_CHARS: usize = 50;

/// Unvalidated quota input, as entered by a user or read from storage.
///
/// Parses from `TAG=COUNT` (or `TAG:COUNT`). The count is kept as a signed
/// integer so that zero and negative requests survive parsing and can be
/// reported by the quota validator instead of failing earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaSpec {
    pub tag: String,
    pub count: i64,
}

impl QuotaSpec {
    pub fn new(tag: impl Into<String>, count: i64) -> Self {
        Self {
            tag: tag.into(),
            count,
        }
    }
}

impl FromStr for QuotaSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (tag, count) = s
            .rsplit_once('=')
            .or_else(|| s.rsplit_once(':'))
            .ok_or_else(|| format!("Invalid quota '{s}': expected TAG=COUNT"))?;

        let count = count
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("Invalid quota '{s}': count must be an integer"))?;

        Ok(QuotaSpec::new(tag.trim(), count))
    }
}

impl From<TagQuota> for QuotaSpec {
    fn from(quota: TagQuota) -> Self {
        QuotaSpec::new(quota.tag, i64::from(quota.count))
    }
}

impl From<&TagQuota> for QuotaSpec {
    fn from(quota: &TagQuota) -> Self {
        QuotaSpec::new(quota.tag.clone(), i64::from(quota.count))
    }
}

/// A validated request to draw `count` exercises tagged `tag`.
///
/// The tag is non-blank and the count is at least one. Deserialization goes
/// through [`QuotaSpec`] so stored values obey the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuotaSpec", into = "QuotaSpec")]
pub struct TagQuota {
    tag: String,
    count: u32,
}

impl TagQuota {
    /// Creates a quota, rejecting blank tags and zero counts.
    pub fn new(tag: impl Into<String>, count: u32) -> Result<Self> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(PlannerError::invalid_input("tag").with_reason("tag must not be blank"));
        }
        if count == 0 {
            return Err(PlannerError::invalid_input("count")
                .with_reason(format!("count for '{tag}' must be at least 1")));
        }
        Ok(Self { tag, count })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn count(&self) -> usize {
        self.count as usize
    }
}

impl TryFrom<QuotaSpec> for TagQuota {
    type Error = PlannerError;

    fn try_from(spec: QuotaSpec) -> Result<Self> {
        let count = u32::try_from(spec.count).map_err(|_| {
            PlannerError::invalid_input("count").with_reason(format!(
                "count for '{}' must be a positive integer, got {}",
                spec.tag, spec.count
            ))
        })?;
        TagQuota::new(spec.tag, count)
    }
}

/// A named, reusable quota configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaTemplate {
    /// Caller-assigned identifier
    pub id: String,

    /// Display name, 1 to 50 characters and not blank
    pub name: String,

    /// Quotas in the order they were entered
    pub quotas: Vec<TagQuota>,

    /// Timestamp when the template was created (UTC)
    pub created_at: Timestamp,
}

impl QuotaTemplate {
    /// Creates a template and checks its shape.
    ///
    /// The name is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when the id or name is blank, the
    /// name is longer than [`MAX_TEMPLATE_NAME_CHARS`], or `quotas` is empty.
    pub fn new(
        id: impl Into<String>,
        name: &str,
        quotas: Vec<TagQuota>,
        created_at: Timestamp,
    ) -> Result<Self> {
        let template = Self {
            id: id.into(),
            name: name.trim().to_string(),
            quotas,
            created_at,
        };
        template.validate()?;
        Ok(template)
    }

    /// Re-checks the shape rules, for templates that did not come through
    /// [`QuotaTemplate::new`].
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PlannerError::invalid_input("id").with_reason("template id must not be blank"));
        }

        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            return Err(
                PlannerError::invalid_input("name").with_reason("template name must not be blank")
            );
        }
        if self.name.chars().count() > MAX_TEMPLATE_NAME_CHARS {
            return Err(PlannerError::invalid_input("name").with_reason(format!(
                "template name must be at most {MAX_TEMPLATE_NAME_CHARS} characters"
            )));
        }

        if self.quotas.is_empty() {
            return Err(PlannerError::invalid_input("quotas")
                .with_reason("template must contain at least one quota"));
        }
        for quota in &self.quotas {
            TagQuota::new(quota.tag(), quota.count)?;
        }

        Ok(())
    }

    /// Returns the quotas as raw specs, ready for the quota validator.
    pub fn quota_specs(&self) -> Vec<QuotaSpec> {
        self.quotas.iter().map(QuotaSpec::from).collect()
    }
}
