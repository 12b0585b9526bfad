// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use staff_ledger_domain::{
    Employee, EmployeePatch, NewEmployee, validate_employee_patch, validate_new_employee,
};
use tracing::{debug, info, warn};

use crate::data_models::{EmployeeChangeset, EmployeeRow, NewEmployeeRow};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;
use crate::queries::employees::get_active_employee;

/// Creates a new employee.
///
/// The opening balance, if any, is written as the starting `current_balance`
/// without a ledger entry. Accumulators start at zero.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee` - The employee fields
///
/// # Errors
///
/// Returns an error if validation fails or the insert fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &NewEmployee,
) -> Result<Employee, PersistenceError> {
    validate_new_employee(employee)?;

    info!(
        "Creating employee with name: {}, position: {}",
        employee.name, employee.position
    );

    let row: EmployeeRow = diesel::insert_into(employees::table)
        .values(NewEmployeeRow::from(employee))
        .returning(EmployeeRow::as_returning())
        .get_result(conn)?;

    info!(employee_id = row.employee_id, "Employee created successfully");

    Employee::try_from(row)
}

/// Applies a closed patch to an active employee.
///
/// An empty patch writes nothing and returns the employee as stored.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee to update
/// * `patch` - The fields to change
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee is absent or
/// inactive, or a validation error for invalid field values.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    patch: &EmployeePatch,
) -> Result<Employee, PersistenceError> {
    validate_employee_patch(patch)?;

    if patch.is_empty() {
        debug!(employee_id, "Empty employee patch, returning stored row");
        return get_active_employee(conn, employee_id);
    }

    info!(employee_id, ?patch, "Updating employee");

    let row: Option<EmployeeRow> = diesel::update(
        employees::table
            .filter(employees::employee_id.eq(employee_id))
            .filter(employees::is_active.eq(1)),
    )
    .set(EmployeeChangeset::from(patch))
    .returning(EmployeeRow::as_returning())
    .get_result(conn)
    .optional()?;

    let Some(row) = row else {
        warn!(employee_id, "Update targeted a missing or inactive employee");
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    };

    Employee::try_from(row)
}

/// Soft-deletes an employee by clearing `is_active`.
///
/// The row and its history stay in place.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee to deactivate
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn soft_delete_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<bool, PersistenceError> {
    let affected: usize = diesel::update(
        employees::table
            .filter(employees::employee_id.eq(employee_id))
            .filter(employees::is_active.eq(1)),
    )
    .set(employees::is_active.eq(0))
    .execute(conn)?;

    if affected == 0 {
        debug!(employee_id, "Employee already inactive or absent");
        return Ok(false);
    }

    info!(employee_id, "Employee deactivated");
    Ok(true)
}
