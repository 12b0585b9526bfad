// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use staff_ledger_domain::DomainError;
use staff_ledger_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and store errors and represent the API
/// contract. A missing employee and an unreachable store are never the same
/// kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A uniqueness or referential constraint was violated.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The ledger store cannot be reached.
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::StoreUnavailable { message } => {
                write!(f, "Store unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::InvalidName(_) => "name",
        DomainError::InvalidAmount(_)
        | DomainError::NonPositiveAmount { .. }
        | DomainError::BalanceOverflow { .. } => "amount",
        DomainError::NegativeDailyWage { .. } => "daily_wage",
        DomainError::InvalidTransactionType(_) => "transaction_type",
        DomainError::InvalidAttendanceStatus(_) => "status",
        DomainError::InvalidPaymentStatus(_) => "payment_status",
        DomainError::DateParseError { .. } => "date",
        DomainError::TimeParseError { .. } => "time",
        DomainError::InvalidDateRange { .. } => "date_range",
        DomainError::InvalidShiftTimes { .. } => "check_out_time",
    };

    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a store error into an API error.
///
/// This translation is explicit and ensures store errors are not leaked directly.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EmployeeNotFound(employee_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} does not exist or is inactive"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::Validation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::Conflict(msg) => ApiError::Conflict { message: msg },
        PersistenceError::StoreUnavailable(msg)
        | PersistenceError::DatabaseConnectionFailed(msg) => {
            ApiError::StoreUnavailable { message: msg }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Overrides the field name of an input error.
///
/// Used where one domain error kind can come from several request fields.
#[must_use]
pub fn with_field(err: ApiError, field: &str) -> ApiError {
    match err {
        ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        other => other,
    }
}
