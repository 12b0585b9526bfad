// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the staff ledger.
//!
//! Sits between the HTTP transport and the ledger store. It owns the request
//! and response shapes, parses strings into domain values, rejects unknown
//! update fields, and translates store and domain failures into [`ApiError`]
//! kinds the transport maps onto status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod patch;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    add_employee, apply_transaction, attendance_report, delete_employee, financial_summary,
    get_employee, list_attendance, list_employees, list_transactions, mark_attendance,
    settle_account, store_status, today_payouts, update_employee,
};
pub use patch::{PATCHABLE_FIELDS, PatchBodyError, parse_update_body};
pub use request_response::{
    AddEmployeeRequest, ApplyTransactionRequest, AttendanceInfo, AttendanceReportRequest,
    AttendanceReportResponse, AttendanceSummaryInfo, DeleteEmployeeResponse, EmployeeInfo,
    EmployeeWithTodayInfo, FinancialSummaryResponse, ListEmployeesRequest,
    MarkAttendanceRequest, MarkAttendanceResponse, SettleAccountResponse, StoreStatusResponse,
    TodayPayoutsResponse, TransactionInfo, UpdateEmployeeRequest,
};
