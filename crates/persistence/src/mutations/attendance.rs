// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The attendance register.

use diesel::prelude::*;
use diesel::SqliteConnection;
use staff_ledger_domain::{AttendanceMark, AttendanceRecord, validate_attendance_mark};
use tracing::{info, warn};

use crate::data_models::{AttendanceChangeset, AttendanceRow, NewAttendanceRow};
use crate::diesel_schema::{attendance, employees};
use crate::error::PersistenceError;

/// Upserts the attendance record for `(employee_id, attendance_date)`.
///
/// Marking the same day again overwrites the status and any shift times or
/// notes that the new mark supplies. Repeating a mark is harmless.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `mark` - The attendance to record
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee is absent or
/// inactive, or a validation error if check-out precedes check-in.
pub fn mark_attendance(
    conn: &mut SqliteConnection,
    mark: &AttendanceMark,
) -> Result<AttendanceRecord, PersistenceError> {
    validate_attendance_mark(mark)?;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let active: Option<i64> = employees::table
            .filter(employees::employee_id.eq(mark.employee_id))
            .filter(employees::is_active.eq(1))
            .select(employees::employee_id)
            .first(conn)
            .optional()?;

        if active.is_none() {
            warn!(
                employee_id = mark.employee_id,
                "Attendance targeted a missing or inactive employee"
            );
            return Err(PersistenceError::EmployeeNotFound(mark.employee_id));
        }

        let row: AttendanceRow = diesel::insert_into(attendance::table)
            .values(NewAttendanceRow::from(mark))
            .on_conflict((attendance::employee_id, attendance::attendance_date))
            .do_update()
            .set(AttendanceChangeset::from(mark))
            .returning(AttendanceRow::as_returning())
            .get_result(conn)?;

        info!(
            employee_id = mark.employee_id,
            attendance_date = %mark.attendance_date,
            status = %mark.status,
            "Attendance marked"
        );

        AttendanceRecord::try_from(row)
    })
}
