// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance and financial aggregates.
//!
//! Sums are folded in Rust with checked arithmetic rather than with `SUM()`,
//! which `SQLite` silently widens to a float on overflow.

use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;
use staff_ledger_domain::{
    AttendanceStatus, AttendanceSummary, DomainError, FinancialSummary, Money, PaymentStatus,
    TransactionType, format_date, validate_date_range,
};
use std::collections::HashMap;
use std::str::FromStr;
use time::Date;
use tracing::debug;

use crate::diesel_schema::{attendance, employees, financial_transactions};
use crate::error::{PersistenceError, stored_value};
use crate::queries::name_order_key;

/// Counts present and absent days per active employee over `[start, end]`.
///
/// Days without a record are not counted. Employees are ordered by name,
/// ignoring case, then by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `start` - First day of the range
/// * `end` - Last day of the range
///
/// # Errors
///
/// Returns a validation error if `start` is after `end`, or a database error.
pub fn attendance_report(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<Vec<AttendanceSummary>, PersistenceError> {
    validate_date_range(start, end)?;
    debug!(%start, %end, "Building attendance report");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut people: Vec<(i64, String, String)> = employees::table
            .filter(employees::is_active.eq(1))
            .select((employees::employee_id, employees::name, employees::position))
            .load(conn)?;
        people.sort_by_cached_key(|(employee_id, name, _)| name_order_key(name, *employee_id));

        // ISO dates compare lexically in chronological order.
        let marks: Vec<(i64, String)> = attendance::table
            .filter(attendance::attendance_date.between(format_date(start), format_date(end)))
            .select((attendance::employee_id, attendance::status))
            .load(conn)?;

        let mut counts: HashMap<i64, (u32, u32)> = HashMap::new();
        for (employee_id, status) in marks {
            let entry: &mut (u32, u32) = counts.entry(employee_id).or_default();
            match stored_value(AttendanceStatus::from_str(&status))? {
                AttendanceStatus::Present => entry.0 = entry.0.saturating_add(1),
                AttendanceStatus::Absent => entry.1 = entry.1.saturating_add(1),
            }
        }

        Ok(people
            .into_iter()
            .map(|(employee_id, name, position)| {
                let (present_days, absent_days) =
                    counts.get(&employee_id).copied().unwrap_or_default();
                AttendanceSummary {
                    employee_id,
                    name,
                    position,
                    present_days,
                    absent_days,
                    total_days: present_days.saturating_add(absent_days),
                }
            })
            .collect())
    })
}

/// Totals wages, balances and accumulators over active employees and counts
/// them by payment status.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails or a total overflows.
pub fn financial_summary(conn: &mut SqliteConnection) -> Result<FinancialSummary, PersistenceError> {
    debug!("Building financial summary");

    let rows: Vec<(i64, i64, i64, i64, String)> = employees::table
        .filter(employees::is_active.eq(1))
        .select((
            employees::daily_wage_cents,
            employees::current_balance_cents,
            employees::total_bonuses_cents,
            employees::total_deductions_cents,
            employees::payment_status,
        ))
        .load(conn)?;

    let total_employees: u32 = rows.len().to_u32().ok_or_else(|| {
        PersistenceError::QueryFailed(format!("Employee count {} out of range", rows.len()))
    })?;

    let mut summary: FinancialSummary = FinancialSummary {
        total_employees,
        ..FinancialSummary::default()
    };

    for (daily_wage, balance, bonuses, deductions, status) in rows {
        summary.total_daily_wages = add(summary.total_daily_wages, daily_wage, "daily wages")?;
        summary.total_current_balance =
            add(summary.total_current_balance, balance, "current balances")?;
        summary.total_bonuses = add(summary.total_bonuses, bonuses, "bonuses")?;
        summary.total_deductions = add(summary.total_deductions, deductions, "deductions")?;

        let counter: &mut u32 = match stored_value(PaymentStatus::from_str(&status))? {
            PaymentStatus::Paid => &mut summary.paid_employees,
            PaymentStatus::Pending => &mut summary.pending_employees,
            PaymentStatus::Deferred => &mut summary.deferred_employees,
        };
        *counter = counter.saturating_add(1);
    }

    Ok(summary)
}

/// Sums every payment dated `today` across all employees.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `today` - The business date
///
/// # Errors
///
/// Returns an error if the database query fails or the sum overflows.
pub fn today_payout_total(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<Money, PersistenceError> {
    let amounts: Vec<i64> = financial_transactions::table
        .filter(financial_transactions::transaction_date.eq(format_date(today)))
        .filter(financial_transactions::transaction_type.eq(TransactionType::Payment.as_str()))
        .select(financial_transactions::amount_cents)
        .load(conn)?;

    Money::checked_sum(amounts.into_iter().map(Money::from_cents)).ok_or_else(|| {
        PersistenceError::Validation(DomainError::BalanceOverflow {
            operation: String::from("summing today's payouts"),
        })
    })
}

fn add(total: Money, cents: i64, what: &str) -> Result<Money, PersistenceError> {
    total.checked_add(Money::from_cents(cents)).ok_or_else(|| {
        PersistenceError::Validation(DomainError::BalanceOverflow {
            operation: format!("summing {what}"),
        })
    })
}
