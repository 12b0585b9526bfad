// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use staff_ledger_domain::DomainError;

/// Errors that can occur during ledger store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// No active employee with this id exists.
    EmployeeNotFound(i64),
    /// The input was rejected by a domain rule.
    Validation(DomainError),
    /// A uniqueness or referential constraint was violated.
    Conflict(String),
    /// The store could not be reached or did not grant a lock in time.
    StoreUnavailable(String),
    /// A stored value could not be read back into a domain type.
    InvalidStoredValue(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::EmployeeNotFound(id) => write!(f, "Employee not found: {id}"),
            Self::Validation(err) => write!(f, "Validation failed: {err}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::StoreUnavailable(msg) => write!(f, "Store unavailable: {msg}"),
            Self::InvalidStoredValue(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => Self::Conflict(info.message().to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                Self::StoreUnavailable(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(_, ref info)
                if is_lock_timeout(info.message()) =>
            {
                Self::StoreUnavailable(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for PersistenceError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err)
    }
}

/// `SQLITE_BUSY` surfaces as a plain message once `busy_timeout` expires.
fn is_lock_timeout(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database table is locked")
}

/// Maps a conversion failure on a row read from the store.
pub(crate) fn stored_value<T>(result: Result<T, DomainError>) -> Result<T, PersistenceError> {
    result.map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))
}
