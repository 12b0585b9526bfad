// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and ledger rules for the staff ledger.
//!
//! This crate has no I/O. It defines the entities the store persists, the
//! closed enumerations they use, validation of incoming values, and the
//! balance-effect table that every ledger write goes through.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod dates;
mod error;
mod ledger;
mod money;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use dates::{format_date, format_time, parse_date, parse_time};
pub use error::DomainError;
pub use ledger::{BalanceEffect, SETTLED_STATUS, settle_balances};
pub use money::{MONEY_SCALE, Money};
pub use types::{
    AttendanceMark, AttendanceRecord, AttendanceStatus, AttendanceSummary, Balances, Employee,
    EmployeeFilter, EmployeePatch, EmployeeWithTodayView, FinancialSummary, FinancialTransaction,
    NewEmployee, NewTransaction, PaymentStatus, Settlement, TodayView, TransactionType,
};
pub use validation::{
    validate_attendance_mark, validate_date_range, validate_employee_patch,
    validate_new_employee, validate_transaction_amount,
};
