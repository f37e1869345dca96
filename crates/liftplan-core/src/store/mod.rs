//! Storage interfaces consumed by the planner.
//!
//! The engine never touches storage itself. These traits describe the two
//! collaborators it reads from: the plan store, which seeds the exercise
//! pool, and the quota template store. [`crate::db::Database`] implements
//! both on SQLite.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{Plan, QuotaTemplate},
};

/// Read access to saved plans.
pub trait PlanStore {
    /// Loads every saved plan with its exercises.
    fn load_plans(&self) -> Result<Vec<Plan>>;
}

/// Persistence for named quota templates.
pub trait QuotaTemplateStore {
    /// Loads all templates in their stored order.
    fn load(&self) -> Result<Vec<QuotaTemplate>>;

    /// Replaces the stored templates with `templates`.
    ///
    /// Failures are reported in the returned [`StorageResult`], not raised.
    fn save(&mut self, templates: &[QuotaTemplate]) -> StorageResult;
}

/// Classification of a failed store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageErrorKind {
    /// Storage is full; freeing space and retrying can succeed
    QuotaExceeded,

    /// Stored data could not be read back
    Corrupted,

    /// Anything else
    Unknown,
}

impl StorageErrorKind {
    /// Whether the caller can reasonably retry after user action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StorageErrorKind::QuotaExceeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageErrorKind::QuotaExceeded => "quota_exceeded",
            StorageErrorKind::Corrupted => "corrupted",
            StorageErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a store write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<StorageErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StorageResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            message: None,
        }
    }

    pub fn failed(error: StorageErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error),
            message: Some(message.into()),
        }
    }
}

/// Loads templates, treating any load failure as an empty list.
pub fn load_templates_or_empty<S>(store: &S) -> Vec<QuotaTemplate>
where
    S: QuotaTemplateStore + ?Sized,
{
    store.load().unwrap_or_else(|err| {
        warn!("Failed to load quota templates, continuing with none: {err}");
        Vec::new()
    })
}

/// Validates every template and saves them only if all are well formed.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` for the first malformed template; the
/// store is not called in that case.
pub fn save_templates_checked<S>(store: &mut S, templates: &[QuotaTemplate]) -> Result<StorageResult>
where
    S: QuotaTemplateStore + ?Sized,
{
    for template in templates {
        template.validate()?;
    }

    let result = store.save(templates);
    if !result.success {
        warn!(
            "Saving {} quota templates failed ({}): {}",
            templates.len(),
            result.error.unwrap_or(StorageErrorKind::Unknown),
            result.message.as_deref().unwrap_or("no details")
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{error::PlannerError, models::TagQuota};

    /// In-memory store that records how often `save` was called.
    #[derive(Default)]
    struct MemoryStore {
        templates: Vec<QuotaTemplate>,
        saves: usize,
        fail_load: bool,
        full: bool,
    }

    impl QuotaTemplateStore for MemoryStore {
        fn load(&self) -> Result<Vec<QuotaTemplate>> {
            if self.fail_load {
                return Err(PlannerError::Configuration {
                    message: "corrupted template data".to_string(),
                });
            }
            Ok(self.templates.clone())
        }

        fn save(&mut self, templates: &[QuotaTemplate]) -> StorageResult {
            self.saves += 1;
            if self.full {
                return StorageResult::failed(StorageErrorKind::QuotaExceeded, "storage full");
            }
            self.templates = templates.to_vec();
            StorageResult::ok()
        }
    }

    fn template(name: &str) -> QuotaTemplate {
        QuotaTemplate::new(
            "t1",
            name,
            vec![TagQuota::new("Chest", 2).unwrap()],
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_failed_load_degrades_to_empty() {
        let store = MemoryStore {
            fail_load: true,
            ..Default::default()
        };
        assert!(load_templates_or_empty(&store).is_empty());
    }

    #[test]
    fn test_invalid_template_never_reaches_store() {
        let mut store = MemoryStore::default();
        let mut bad = template("Push");
        bad.name = "   ".to_string();

        let result = save_templates_checked(&mut store, &[bad]);
        assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn test_store_failure_is_reported_not_raised() {
        let mut store = MemoryStore {
            full: true,
            ..Default::default()
        };

        let result = save_templates_checked(&mut store, &[template("Push")]).unwrap();
        assert!(!result.success);
        assert_eq!(result.error, Some(StorageErrorKind::QuotaExceeded));
        assert!(result.error.is_some_and(|kind| kind.is_recoverable()));
    }

    #[test]
    fn test_round_trip_through_memory_store() {
        let mut store = MemoryStore::default();
        let saved = template("Push");

        let result = save_templates_checked(&mut store, std::slice::from_ref(&saved)).unwrap();
        assert!(result.success);
        assert_eq!(load_templates_or_empty(&store)[0].quotas, saved.quotas);
    }
}
