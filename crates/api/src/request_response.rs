// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry enums, dates and times as strings; the handlers parse them
//! so that a bad value is reported against the field it came from. Amounts
//! are decimals and serialize as strings with two decimal places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use staff_ledger_domain::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, Employee, EmployeeWithTodayView,
    FinancialSummary, FinancialTransaction, Money, PaymentStatus, Settlement, TransactionType,
    format_date, format_time,
};

/// Optional filters for the employee listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesRequest {
    /// One of `pending`, `paid`, `deferred`.
    pub payment_status: Option<String>,
    /// Exact position match.
    pub position: Option<String>,
}

/// API request to create an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEmployeeRequest {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub phone: String,
    pub daily_wage: Decimal,
    /// Opening balance. Defaults to zero.
    pub current_balance: Option<Decimal>,
    /// `YYYY-MM-DD`. Defaults to today.
    pub hire_date: Option<String>,
}

/// API request to update an employee. Built by [`crate::parse_update_body`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub daily_wage: Option<Decimal>,
    pub payment_status: Option<String>,
    pub hire_date: Option<String>,
}

/// API request to mark attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    /// `present` or `absent`.
    pub status: String,
    /// `YYYY-MM-DD`. Defaults to today.
    pub date: Option<String>,
    /// `HH:MM` or `HH:MM:SS`.
    pub check_in_time: Option<String>,
    /// `HH:MM` or `HH:MM:SS`.
    pub check_out_time: Option<String>,
    pub notes: Option<String>,
}

/// API request to apply a financial transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyTransactionRequest {
    /// One of `payment`, `deduction`, `bonus`.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Positive magnitude with at most two decimal places.
    pub amount: Decimal,
    pub description: Option<String>,
    /// `YYYY-MM-DD`. Defaults to today.
    pub date: Option<String>,
}

/// API request for the attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReportRequest {
    /// First day, `YYYY-MM-DD`.
    pub start: String,
    /// Last day, `YYYY-MM-DD`, inclusive.
    pub end: String,
}

/// An employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub employee_id: i64,
    pub name: String,
    pub position: String,
    pub phone: String,
    pub daily_wage: Money,
    pub current_balance: Money,
    pub total_bonuses: Money,
    pub total_deductions: Money,
    pub payment_status: PaymentStatus,
    pub is_active: bool,
    pub hire_date: String,
    pub last_payment_date: Option<String>,
}

impl From<Employee> for EmployeeInfo {
    fn from(employee: Employee) -> Self {
        Self {
            employee_id: employee.employee_id,
            name: employee.name,
            position: employee.position,
            phone: employee.phone,
            daily_wage: employee.daily_wage,
            current_balance: employee.balances.current_balance,
            total_bonuses: employee.balances.total_bonuses,
            total_deductions: employee.balances.total_deductions,
            payment_status: employee.payment_status,
            is_active: employee.is_active,
            hire_date: format_date(employee.hire_date),
            last_payment_date: employee.last_payment_date.map(format_date),
        }
    }
}

/// An active employee with the day's aggregates.
///
/// `today_withdrawals` is the sum of the day's `payment` transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeWithTodayInfo {
    #[serde(flatten)]
    pub employee: EmployeeInfo,
    pub today_attendance: AttendanceStatus,
    pub today_withdrawals: Money,
    pub today_bonuses: Money,
    pub today_deductions: Money,
}

impl From<EmployeeWithTodayView> for EmployeeWithTodayInfo {
    fn from(view: EmployeeWithTodayView) -> Self {
        Self {
            employee: EmployeeInfo::from(view.employee),
            today_attendance: view.today.attendance,
            today_withdrawals: view.today.withdrawals,
            today_bonuses: view.today.bonuses,
            today_deductions: view.today.deductions,
        }
    }
}

/// API response for a soft delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    /// `false` if the employee was already inactive or does not exist.
    pub success: bool,
}

/// An attendance record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceInfo {
    pub attendance_id: i64,
    pub employee_id: i64,
    pub date: String,
    pub status: AttendanceStatus,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub notes: Option<String>,
}

impl From<AttendanceRecord> for AttendanceInfo {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            attendance_id: record.attendance_id,
            employee_id: record.employee_id,
            date: format_date(record.attendance_date),
            status: record.status,
            check_in_time: record.check_in_time.map(format_time),
            check_out_time: record.check_out_time.map(format_time),
            notes: record.notes,
        }
    }
}

/// API response for a successful attendance mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAttendanceResponse {
    pub success: bool,
    pub attendance: AttendanceInfo,
}

/// A ledger entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub transaction_id: i64,
    pub employee_id: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Money,
    pub description: Option<String>,
    pub date: String,
    pub created_at: String,
}

impl From<FinancialTransaction> for TransactionInfo {
    fn from(transaction: FinancialTransaction) -> Self {
        Self {
            transaction_id: transaction.transaction_id,
            employee_id: transaction.employee_id,
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            description: transaction.description,
            date: format_date(transaction.transaction_date),
            created_at: transaction.created_at,
        }
    }
}

/// API response for a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleAccountResponse {
    pub success: bool,
    pub employee_id: i64,
    /// The balance that was discarded.
    pub settled_amount: Money,
    pub settled_on: String,
}

impl From<Settlement> for SettleAccountResponse {
    fn from(settlement: Settlement) -> Self {
        Self {
            success: true,
            employee_id: settlement.employee_id,
            settled_amount: settlement.settled_balance,
            settled_on: format_date(settlement.settled_on),
        }
    }
}

/// One row of the attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummaryInfo {
    pub employee_id: i64,
    pub name: String,
    pub position: String,
    pub present_days: u32,
    pub absent_days: u32,
    pub total_days: u32,
}

impl From<AttendanceSummary> for AttendanceSummaryInfo {
    fn from(summary: AttendanceSummary) -> Self {
        Self {
            employee_id: summary.employee_id,
            name: summary.name,
            position: summary.position,
            present_days: summary.present_days,
            absent_days: summary.absent_days,
            total_days: summary.total_days,
        }
    }
}

/// API response for the attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReportResponse {
    pub start: String,
    pub end: String,
    pub employees: Vec<AttendanceSummaryInfo>,
}

/// API response for the financial summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummaryResponse {
    pub total_employees: u32,
    pub total_daily_wages: Money,
    pub total_current_balance: Money,
    pub total_bonuses: Money,
    pub total_deductions: Money,
    pub paid_employees: u32,
    pub pending_employees: u32,
    pub deferred_employees: u32,
}

impl From<FinancialSummary> for FinancialSummaryResponse {
    fn from(summary: FinancialSummary) -> Self {
        Self {
            total_employees: summary.total_employees,
            total_daily_wages: summary.total_daily_wages,
            total_current_balance: summary.total_current_balance,
            total_bonuses: summary.total_bonuses,
            total_deductions: summary.total_deductions,
            paid_employees: summary.paid_employees,
            pending_employees: summary.pending_employees,
            deferred_employees: summary.deferred_employees,
        }
    }
}

/// API response for the day's payout total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayPayoutsResponse {
    pub date: String,
    pub total_payouts: Money,
}

/// API response describing store reachability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatusResponse {
    pub store_available: bool,
}
