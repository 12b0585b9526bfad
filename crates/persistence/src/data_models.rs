// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types for the ledger tables and their conversions to domain types.
//!
//! Money is stored as signed cents, dates as `YYYY-MM-DD` text, times as
//! `HH:MM:SS` text and the active flag as `0`/`1`.

use diesel::prelude::*;
use staff_ledger_domain::{
    AttendanceMark, AttendanceRecord, AttendanceStatus, Balances, Employee, EmployeePatch,
    FinancialTransaction, Money, NewEmployee, NewTransaction, PaymentStatus, TransactionType,
    format_date, format_time, parse_date, parse_time,
};
use std::str::FromStr;

use crate::diesel_schema::{attendance, employees, financial_transactions};
use crate::error::{PersistenceError, stored_value};

/// Diesel Queryable struct for employee rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub name: String,
    pub position: String,
    pub phone: String,
    pub daily_wage_cents: i64,
    pub current_balance_cents: i64,
    pub total_bonuses_cents: i64,
    pub total_deductions_cents: i64,
    pub payment_status: String,
    pub is_active: i32,
    pub hire_date: String,
    pub last_payment_date: Option<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            employee_id: row.employee_id,
            name: row.name,
            position: row.position,
            phone: row.phone,
            daily_wage: Money::from_cents(row.daily_wage_cents),
            balances: Balances {
                current_balance: Money::from_cents(row.current_balance_cents),
                total_bonuses: Money::from_cents(row.total_bonuses_cents),
                total_deductions: Money::from_cents(row.total_deductions_cents),
            },
            payment_status: stored_value(PaymentStatus::from_str(&row.payment_status))?,
            is_active: row.is_active != 0,
            hire_date: stored_value(parse_date(&row.hire_date))?,
            last_payment_date: stored_value(
                row.last_payment_date.as_deref().map(parse_date).transpose(),
            )?,
        })
    }
}

/// Balance columns of an employee row.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceRow {
    pub current_balance_cents: i64,
    pub total_bonuses_cents: i64,
    pub total_deductions_cents: i64,
}

impl From<BalanceRow> for Balances {
    fn from(row: BalanceRow) -> Self {
        Self {
            current_balance: Money::from_cents(row.current_balance_cents),
            total_bonuses: Money::from_cents(row.total_bonuses_cents),
            total_deductions: Money::from_cents(row.total_deductions_cents),
        }
    }
}

/// Insertable employee. Accumulators and flags take their column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow<'a> {
    pub name: &'a str,
    pub position: &'a str,
    pub phone: &'a str,
    pub daily_wage_cents: i64,
    pub current_balance_cents: i64,
    pub hire_date: String,
}

impl<'a> From<&'a NewEmployee> for NewEmployeeRow<'a> {
    fn from(employee: &'a NewEmployee) -> Self {
        Self {
            name: employee.name.trim(),
            position: employee.position.trim(),
            phone: employee.phone.trim(),
            daily_wage_cents: employee.daily_wage.cents(),
            current_balance_cents: employee.opening_balance.cents(),
            hire_date: format_date(employee.hire_date),
        }
    }
}

/// Changeset for the patchable employee columns. `None` leaves a column as is.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = employees)]
pub struct EmployeeChangeset {
    pub name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub daily_wage_cents: Option<i64>,
    pub payment_status: Option<String>,
    pub hire_date: Option<String>,
}

impl From<&EmployeePatch> for EmployeeChangeset {
    fn from(patch: &EmployeePatch) -> Self {
        Self {
            name: patch.name.as_deref().map(|n| n.trim().to_string()),
            position: patch.position.as_deref().map(|p| p.trim().to_string()),
            phone: patch.phone.as_deref().map(|p| p.trim().to_string()),
            daily_wage_cents: patch.daily_wage.map(Money::cents),
            payment_status: patch.payment_status.map(|s| s.as_str().to_string()),
            hire_date: patch.hire_date.map(format_date),
        }
    }
}

/// Diesel Queryable struct for attendance rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = attendance)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttendanceRow {
    pub attendance_id: i64,
    pub employee_id: i64,
    pub attendance_date: String,
    pub status: String,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = PersistenceError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let parse_optional_time = |value: Option<String>| {
            stored_value(value.as_deref().map(parse_time).transpose())
        };

        Ok(Self {
            attendance_id: row.attendance_id,
            employee_id: row.employee_id,
            attendance_date: stored_value(parse_date(&row.attendance_date))?,
            status: stored_value(AttendanceStatus::from_str(&row.status))?,
            check_in_time: parse_optional_time(row.check_in_time)?,
            check_out_time: parse_optional_time(row.check_out_time)?,
            notes: row.notes,
        })
    }
}

/// Insertable attendance record.
#[derive(Debug, Insertable)]
#[diesel(table_name = attendance)]
pub struct NewAttendanceRow {
    pub employee_id: i64,
    pub attendance_date: String,
    pub status: String,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub notes: Option<String>,
}

/// Columns overwritten when a day is marked again. `None` keeps the earlier value.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = attendance)]
pub struct AttendanceChangeset {
    pub status: String,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub notes: Option<String>,
}

impl From<&AttendanceMark> for NewAttendanceRow {
    fn from(mark: &AttendanceMark) -> Self {
        Self {
            employee_id: mark.employee_id,
            attendance_date: format_date(mark.attendance_date),
            status: mark.status.as_str().to_string(),
            check_in_time: mark.check_in_time.map(format_time),
            check_out_time: mark.check_out_time.map(format_time),
            notes: mark.notes.clone(),
        }
    }
}

impl From<&AttendanceMark> for AttendanceChangeset {
    fn from(mark: &AttendanceMark) -> Self {
        Self {
            status: mark.status.as_str().to_string(),
            check_in_time: mark.check_in_time.map(format_time),
            check_out_time: mark.check_out_time.map(format_time),
            notes: mark.notes.clone(),
        }
    }
}

/// Diesel Queryable struct for ledger rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = financial_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRow {
    pub transaction_id: i64,
    pub employee_id: i64,
    pub transaction_type: String,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub transaction_date: String,
    pub created_at: String,
}

impl TryFrom<TransactionRow> for FinancialTransaction {
    type Error = PersistenceError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_id: row.transaction_id,
            employee_id: row.employee_id,
            transaction_type: stored_value(TransactionType::from_str(&row.transaction_type))?,
            amount: Money::from_cents(row.amount_cents),
            description: row.description,
            transaction_date: stored_value(parse_date(&row.transaction_date))?,
            created_at: row.created_at,
        })
    }
}

/// Insertable ledger row. `created_at` takes the store timestamp.
#[derive(Debug, Insertable)]
#[diesel(table_name = financial_transactions)]
pub struct NewTransactionRow<'a> {
    pub employee_id: i64,
    pub transaction_type: &'static str,
    pub amount_cents: i64,
    pub description: Option<&'a str>,
    pub transaction_date: String,
}

impl<'a> From<&'a NewTransaction> for NewTransactionRow<'a> {
    fn from(transaction: &'a NewTransaction) -> Self {
        Self {
            employee_id: transaction.employee_id(),
            transaction_type: transaction.transaction_type().as_str(),
            amount_cents: transaction.amount().cents(),
            description: transaction.description(),
            transaction_date: format_date(transaction.transaction_date()),
        }
    }
}
