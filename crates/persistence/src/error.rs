// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caseload::{ExternalSystem, SourceError};
use caseload_domain::DomainError;
use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// The connection is already in use by another call.
    #[error("Database connection is busy")]
    ConnectionBusy,
    /// A stored row could not be read back as a licence.
    #[error("Licence {licence_id} is not valid: {source}")]
    InvalidRecord {
        /// The offending row.
        licence_id: i64,
        /// What was wrong with it.
        source: DomainError,
    },
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<PersistenceError> for SourceError {
    fn from(err: PersistenceError) -> Self {
        Self::new(ExternalSystem::LicenceStore, err.to_string())
    }
}
