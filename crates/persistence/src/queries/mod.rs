// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the ledger store.
//!
//! This module contains all read-only queries.
//!
//! ## Module Organization
//!
//! - `employees`: Single-employee lookups
//! - `today_view`: The read model: active employees with the day's aggregates
//! - `transactions`: Ledger listing
//! - `attendance`: Attendance listing
//! - `reports`: Attendance and financial aggregates

pub mod attendance;
pub mod employees;
pub mod reports;
pub mod today_view;
pub mod transactions;

/// Sort key for employee listings: case-insensitive name, then id.
pub(crate) fn name_order_key(name: &str, employee_id: i64) -> (String, i64) {
    (name.to_lowercase(), employee_id)
}
