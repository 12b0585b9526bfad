// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of employee update bodies.
//!
//! The patchable field set is closed. A body naming any other key is rejected
//! outright instead of being partly applied.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::ApiError;
use crate::request_response::UpdateEmployeeRequest;

/// Keys accepted in an employee update body.
pub const PATCHABLE_FIELDS: [&str; 6] = [
    "name",
    "position",
    "phone",
    "daily_wage",
    "payment_status",
    "hire_date",
];

/// Update body errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchBodyError {
    /// The body is not a JSON object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// The body names a field outside the patchable set.
    #[error("Unknown or read-only field '{field}'. Updatable fields: {allowed}")]
    UnknownField { field: String, allowed: String },

    /// A known field has a value of the wrong shape.
    #[error("{message}")]
    InvalidValue { message: String },
}

impl PatchBodyError {
    fn field(&self) -> &str {
        match self {
            Self::NotAnObject | Self::InvalidValue { .. } => "body",
            Self::UnknownField { field, .. } => field,
        }
    }
}

impl From<PatchBodyError> for ApiError {
    fn from(err: PatchBodyError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Parses a JSON update body into a closed update request.
///
/// # Errors
///
/// Returns `PatchBodyError::UnknownField` for the first key outside
/// [`PATCHABLE_FIELDS`], or another `PatchBodyError` if the body is not an
/// object or a value has the wrong type.
pub fn parse_update_body(body: Value) -> Result<UpdateEmployeeRequest, PatchBodyError> {
    let object: &Map<String, Value> = body.as_object().ok_or(PatchBodyError::NotAnObject)?;

    if let Some(unknown) = object
        .keys()
        .find(|key| !PATCHABLE_FIELDS.contains(&key.as_str()))
    {
        return Err(PatchBodyError::UnknownField {
            field: unknown.clone(),
            allowed: PATCHABLE_FIELDS.join(", "),
        });
    }

    serde_json::from_value(body).map_err(|e| PatchBodyError::InvalidValue {
        message: e.to_string(),
    })
}
