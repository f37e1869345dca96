//! Database operations and SQLite management for plans and templates.
//!
//! This module provides the SQLite-backed store used by the planner. It
//! handles connections, schema management, plan CRUD, and implements the
//! [`PlanStore`](crate::store::PlanStore) and
//! [`QuotaTemplateStore`](crate::store::QuotaTemplateStore) traits.

use std::path::Path;

use rusqlite::{Connection, ErrorCode};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    store::StorageErrorKind,
};

pub mod migrations;
pub mod plan_queries;
pub mod template_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Classifies a failed write for [`crate::store::StorageResult`].
pub(crate) fn classify_error(err: &PlannerError) -> StorageErrorKind {
    match err {
        PlannerError::Database { source, .. } => match source {
            rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
                ErrorCode::DiskFull => StorageErrorKind::QuotaExceeded,
                ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase => {
                    StorageErrorKind::Corrupted
                }
                _ => StorageErrorKind::Unknown,
            },
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..) => StorageErrorKind::Corrupted,
            _ => StorageErrorKind::Unknown,
        },
        PlannerError::Serialization { .. } => StorageErrorKind::Corrupted,
        _ => StorageErrorKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_full_is_quota_exceeded() {
        let err = PlannerError::database("write failed").with_source(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
            None,
        ));
        assert_eq!(classify_error(&err), StorageErrorKind::QuotaExceeded);
    }

    #[test]
    fn test_corrupt_database_is_corrupted() {
        let err = PlannerError::database("read failed").with_source(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CORRUPT),
            None,
        ));
        assert_eq!(classify_error(&err), StorageErrorKind::Corrupted);
    }

    #[test]
    fn test_other_errors_are_unknown() {
        let err = PlannerError::PlanNotFound { id: 4 };
        assert_eq!(classify_error(&err), StorageErrorKind::Unknown);
    }
}
