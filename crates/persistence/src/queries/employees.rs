// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use staff_ledger_domain::Employee;
use tracing::debug;

use crate::data_models::EmployeeRow;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Retrieves an employee row by id regardless of the active flag.
///
/// Soft-deleted rows stay readable here for history and audit lookups.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if no row exists.
pub fn get_employee_record(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Employee, PersistenceError> {
    debug!("Looking up employee record by ID: {}", employee_id);

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    row.map_or(Err(PersistenceError::EmployeeNotFound(employee_id)), Employee::try_from)
}

/// Retrieves an active employee by id.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the row is missing or
/// inactive.
pub fn get_active_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Employee, PersistenceError> {
    debug!("Looking up active employee by ID: {}", employee_id);

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .filter(employees::is_active.eq(1))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    row.map_or(Err(PersistenceError::EmployeeNotFound(employee_id)), Employee::try_from)
}

/// Returns whether a row exists for the employee, active or not.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn employee_exists(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<bool, PersistenceError> {
    let found: bool = diesel::select(diesel::dsl::exists(
        employees::table.filter(employees::employee_id.eq(employee_id)),
    ))
    .get_result(conn)?;
    Ok(found)
}
