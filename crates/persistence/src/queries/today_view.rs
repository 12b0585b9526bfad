// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The read model.
//!
//! Joins every active employee with the day's attendance status and the
//! day's transaction sums by type. All three reads run in one transaction, so
//! a ledger row is never seen without the balance update committed with it.

use diesel::prelude::*;
use diesel::SqliteConnection;
use staff_ledger_domain::{
    AttendanceStatus, Employee, EmployeeFilter, EmployeeWithTodayView, Money, TodayView,
    TransactionType, format_date,
};
use std::collections::HashMap;
use std::str::FromStr;
use time::Date;
use tracing::debug;

use crate::data_models::EmployeeRow;
use crate::diesel_schema::{attendance, employees, financial_transactions};
use crate::error::{PersistenceError, stored_value};
use crate::queries::name_order_key;

/// Lists active employees ordered by name (case-insensitive, then id), each
/// with its view of `today`.
///
/// Employees with no attendance record for the day report `absent`; missing
/// sums are zero.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `filter` - Optional payment status and position narrowing
/// * `today` - The business date to aggregate
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees_with_today_view(
    conn: &mut SqliteConnection,
    filter: &EmployeeFilter,
    today: Date,
) -> Result<Vec<EmployeeWithTodayView>, PersistenceError> {
    let day: String = format_date(today);
    debug!(%day, ?filter, "Building today view");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut query = employees::table
            .filter(employees::is_active.eq(1))
            .select(EmployeeRow::as_select())
            .into_boxed();

        if let Some(status) = filter.payment_status {
            query = query.filter(employees::payment_status.eq(status.as_str()));
        }
        if let Some(position) = &filter.position {
            query = query.filter(employees::position.eq(position.clone()));
        }

        let mut rows: Vec<EmployeeRow> = query.load(conn)?;
        rows.sort_by_cached_key(|row| name_order_key(&row.name, row.employee_id));

        let marks: Vec<(i64, String)> = attendance::table
            .filter(attendance::attendance_date.eq(&day))
            .select((attendance::employee_id, attendance::status))
            .load(conn)?;

        let amounts: Vec<(i64, String, i64)> = financial_transactions::table
            .filter(financial_transactions::transaction_date.eq(&day))
            .select((
                financial_transactions::employee_id,
                financial_transactions::transaction_type,
                financial_transactions::amount_cents,
            ))
            .load(conn)?;

        let mut views: HashMap<i64, TodayView> = HashMap::new();

        for (employee_id, status) in marks {
            views.entry(employee_id).or_default().attendance =
                stored_value(AttendanceStatus::from_str(&status))?;
        }

        for (employee_id, transaction_type, amount_cents) in amounts {
            let transaction_type: TransactionType =
                stored_value(TransactionType::from_str(&transaction_type))?;
            views
                .entry(employee_id)
                .or_default()
                .record_transaction(transaction_type, Money::from_cents(amount_cents))?;
        }

        rows.into_iter()
            .map(|row| -> Result<EmployeeWithTodayView, PersistenceError> {
                let today: TodayView = views.get(&row.employee_id).copied().unwrap_or_default();
                Ok(EmployeeWithTodayView {
                    employee: Employee::try_from(row)?,
                    today,
                })
            })
            .collect()
    })
}
