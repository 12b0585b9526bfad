// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One function per logical operation.
//!
//! Handlers parse request strings into domain values, call the store, and
//! translate every failure into an [`ApiError`]. "Today" is a parameter: the
//! transport layer decides the business date.

use rust_decimal::Decimal;
use staff_ledger_domain::{
    AttendanceMark, AttendanceStatus, Employee, EmployeeFilter, EmployeePatch, Money,
    NewEmployee, NewTransaction, PaymentStatus, TransactionType, parse_date, parse_time,
};
use staff_ledger_persistence::LedgerStore;
use std::str::FromStr;
use time::{Date, Time};
use tracing::info;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error, with_field};
use crate::request_response::{
    AddEmployeeRequest, ApplyTransactionRequest, AttendanceInfo, AttendanceReportRequest,
    AttendanceReportResponse, DeleteEmployeeResponse, EmployeeInfo, EmployeeWithTodayInfo,
    FinancialSummaryResponse, ListEmployeesRequest, MarkAttendanceRequest,
    MarkAttendanceResponse, SettleAccountResponse, StoreStatusResponse, TodayPayoutsResponse,
    TransactionInfo, UpdateEmployeeRequest,
};

fn parse_money(value: Decimal, field: &str) -> Result<Money, ApiError> {
    Money::from_decimal(value).map_err(|e| with_field(translate_domain_error(e), field))
}

fn parse_date_field(value: &str, field: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| with_field(translate_domain_error(e), field))
}

fn parse_optional_date(value: Option<&str>, field: &str, today: Date) -> Result<Date, ApiError> {
    value.map_or(Ok(today), |v| parse_date_field(v, field))
}

fn parse_optional_time(value: Option<&str>, field: &str) -> Result<Option<Time>, ApiError> {
    value
        .map(|v| parse_time(v).map_err(|e| with_field(translate_domain_error(e), field)))
        .transpose()
}

fn parse_payment_status(value: &str) -> Result<PaymentStatus, ApiError> {
    PaymentStatus::from_str(value).map_err(translate_domain_error)
}

// ========================================================================
// Employees
// ========================================================================

/// Lists active employees with their view of `today`, ordered by name.
///
/// # Errors
///
/// Returns an error if a filter value is invalid or the store fails.
pub fn list_employees(
    store: &LedgerStore,
    request: &ListEmployeesRequest,
    today: Date,
) -> Result<Vec<EmployeeWithTodayInfo>, ApiError> {
    let filter: EmployeeFilter = EmployeeFilter {
        payment_status: request
            .payment_status
            .as_deref()
            .map(parse_payment_status)
            .transpose()?,
        position: request.position.clone(),
    };

    let views = store
        .list_employees_with_today_view(&filter, today)
        .map_err(translate_persistence_error)?;

    Ok(views.into_iter().map(EmployeeWithTodayInfo::from).collect())
}

/// Retrieves one active employee.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee does not exist or
/// has been deleted.
pub fn get_employee(store: &LedgerStore, employee_id: i64) -> Result<EmployeeInfo, ApiError> {
    store
        .get_employee(employee_id)
        .map(EmployeeInfo::from)
        .map_err(translate_persistence_error)
}

/// Creates an employee.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a blank name, a negative wage or a
/// malformed amount or date.
pub fn add_employee(
    store: &LedgerStore,
    request: &AddEmployeeRequest,
    today: Date,
) -> Result<EmployeeInfo, ApiError> {
    let new_employee: NewEmployee = NewEmployee {
        name: request.name.clone(),
        position: request.position.clone(),
        phone: request.phone.clone(),
        daily_wage: parse_money(request.daily_wage, "daily_wage")?,
        opening_balance: request
            .current_balance
            .map(|v| parse_money(v, "current_balance"))
            .transpose()?
            .unwrap_or(Money::ZERO),
        hire_date: parse_optional_date(request.hire_date.as_deref(), "hire_date", today)?,
    };

    let employee: Employee = store
        .insert_employee(&new_employee)
        .map_err(translate_persistence_error)?;

    info!(employee_id = employee.employee_id, "Employee added");
    Ok(EmployeeInfo::from(employee))
}

/// Applies a closed patch to an active employee.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee is missing or
/// inactive, or `ApiError::InvalidInput` for an invalid value.
pub fn update_employee(
    store: &LedgerStore,
    employee_id: i64,
    request: &UpdateEmployeeRequest,
) -> Result<EmployeeInfo, ApiError> {
    let patch: EmployeePatch = EmployeePatch {
        name: request.name.clone(),
        position: request.position.clone(),
        phone: request.phone.clone(),
        daily_wage: request
            .daily_wage
            .map(|v| parse_money(v, "daily_wage"))
            .transpose()?,
        payment_status: request
            .payment_status
            .as_deref()
            .map(parse_payment_status)
            .transpose()?,
        hire_date: request
            .hire_date
            .as_deref()
            .map(|v| parse_date_field(v, "hire_date"))
            .transpose()?,
    };

    store
        .update_employee(employee_id, &patch)
        .map(EmployeeInfo::from)
        .map_err(translate_persistence_error)
}

/// Soft-deletes an employee.
///
/// # Errors
///
/// Returns an error only if the store fails.
pub fn delete_employee(
    store: &LedgerStore,
    employee_id: i64,
) -> Result<DeleteEmployeeResponse, ApiError> {
    let success: bool = store
        .soft_delete_employee(employee_id)
        .map_err(translate_persistence_error)?;
    Ok(DeleteEmployeeResponse { success })
}

// ========================================================================
// Attendance
// ========================================================================

/// Records attendance for an active employee.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee is missing or
/// inactive, or `ApiError::InvalidInput` for a bad status, date or time.
pub fn mark_attendance(
    store: &LedgerStore,
    employee_id: i64,
    request: &MarkAttendanceRequest,
    today: Date,
) -> Result<MarkAttendanceResponse, ApiError> {
    let mark: AttendanceMark = AttendanceMark {
        employee_id,
        attendance_date: parse_optional_date(request.date.as_deref(), "date", today)?,
        status: AttendanceStatus::from_str(&request.status).map_err(translate_domain_error)?,
        check_in_time: parse_optional_time(request.check_in_time.as_deref(), "check_in_time")?,
        check_out_time: parse_optional_time(
            request.check_out_time.as_deref(),
            "check_out_time",
        )?,
        notes: request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    };

    let record = store
        .mark_attendance(&mark)
        .map_err(translate_persistence_error)?;

    Ok(MarkAttendanceResponse {
        success: true,
        attendance: AttendanceInfo::from(record),
    })
}

/// Lists an employee's attendance records.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee does not exist.
pub fn list_attendance(
    store: &LedgerStore,
    employee_id: i64,
) -> Result<Vec<AttendanceInfo>, ApiError> {
    let records = store
        .list_attendance(employee_id)
        .map_err(translate_persistence_error)?;
    Ok(records.into_iter().map(AttendanceInfo::from).collect())
}

// ========================================================================
// Ledger
// ========================================================================

/// Applies a payment, deduction or bonus.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown type or a non-positive or
/// malformed amount, and `ApiError::ResourceNotFound` if the employee is
/// missing or inactive. Nothing is written on error.
pub fn apply_transaction(
    store: &LedgerStore,
    employee_id: i64,
    request: &ApplyTransactionRequest,
    today: Date,
) -> Result<TransactionInfo, ApiError> {
    let transaction_type: TransactionType =
        TransactionType::from_str(&request.transaction_type).map_err(translate_domain_error)?;
    let amount: Money = parse_money(request.amount, "amount")?;
    let transaction_date: Date = parse_optional_date(request.date.as_deref(), "date", today)?;

    let transaction: NewTransaction = NewTransaction::new(
        employee_id,
        transaction_type,
        amount,
        request.description.clone(),
        transaction_date,
    )
    .map_err(translate_domain_error)?;

    store
        .apply_transaction(&transaction)
        .map(TransactionInfo::from)
        .map_err(translate_persistence_error)
}

/// Lists an employee's ledger in id order.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee does not exist.
pub fn list_transactions(
    store: &LedgerStore,
    employee_id: i64,
) -> Result<Vec<TransactionInfo>, ApiError> {
    let transactions = store
        .list_transactions(employee_id)
        .map_err(translate_persistence_error)?;
    Ok(transactions.into_iter().map(TransactionInfo::from).collect())
}

/// Zeroes an employee's balance and marks the account paid.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee does not exist.
pub fn settle_account(
    store: &LedgerStore,
    employee_id: i64,
    today: Date,
) -> Result<SettleAccountResponse, ApiError> {
    store
        .settle_account(employee_id, today)
        .map(SettleAccountResponse::from)
        .map_err(translate_persistence_error)
}

// ========================================================================
// Reports
// ========================================================================

/// Attendance counts per active employee over an inclusive range.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for malformed dates or `start > end`.
pub fn attendance_report(
    store: &LedgerStore,
    request: &AttendanceReportRequest,
) -> Result<AttendanceReportResponse, ApiError> {
    let start: Date = parse_date_field(&request.start, "start")?;
    let end: Date = parse_date_field(&request.end, "end")?;

    let summaries = store
        .attendance_report(start, end)
        .map_err(translate_persistence_error)?;

    Ok(AttendanceReportResponse {
        start: request.start.trim().to_string(),
        end: request.end.trim().to_string(),
        employees: summaries.into_iter().map(Into::into).collect(),
    })
}

/// Totals over active employees.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn financial_summary(store: &LedgerStore) -> Result<FinancialSummaryResponse, ApiError> {
    store
        .financial_summary()
        .map(FinancialSummaryResponse::from)
        .map_err(translate_persistence_error)
}

/// Sum of the day's payments across all employees.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn today_payouts(store: &LedgerStore, today: Date) -> Result<TodayPayoutsResponse, ApiError> {
    let total_payouts: Money = store
        .today_payout_total(today)
        .map_err(translate_persistence_error)?;
    Ok(TodayPayoutsResponse {
        date: staff_ledger_domain::format_date(today),
        total_payouts,
    })
}

/// Reports whether the store is reachable. Never fails.
#[must_use]
pub fn store_status(store: &LedgerStore) -> StoreStatusResponse {
    StoreStatusResponse {
        store_available: store.is_store_available(),
    }
}
