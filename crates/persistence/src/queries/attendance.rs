// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use staff_ledger_domain::AttendanceRecord;
use tracing::debug;

use crate::data_models::AttendanceRow;
use crate::diesel_schema::attendance;
use crate::error::PersistenceError;
use crate::queries::employees::employee_exists;

/// Lists an employee's attendance records ordered by date.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee does not exist.
pub fn list_attendance(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<AttendanceRecord>, PersistenceError> {
    debug!("Listing attendance for employee ID: {}", employee_id);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if !employee_exists(conn, employee_id)? {
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        }

        let rows: Vec<AttendanceRow> = attendance::table
            .filter(attendance::employee_id.eq(employee_id))
            .order(attendance::attendance_date.asc())
            .select(AttendanceRow::as_select())
            .load(conn)?;

        rows.into_iter().map(AttendanceRecord::try_from).collect()
    })
}
