// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rust_decimal_macros::dec;
use staff_ledger_persistence::LedgerStore;
use time::Date;
use time::macros::date;

use crate::{
    AddEmployeeRequest, ApplyTransactionRequest, EmployeeInfo, TransactionInfo, add_employee,
    apply_transaction,
};

/// The business date used throughout the API tests.
pub const fn create_test_today() -> Date {
    date!(2024 - 01 - 15)
}

pub fn create_test_store() -> LedgerStore {
    LedgerStore::open_in_memory().expect("Failed to create in-memory store")
}

pub fn create_valid_add_request(name: &str) -> AddEmployeeRequest {
    AddEmployeeRequest {
        name: name.to_string(),
        position: String::from("Stylist"),
        phone: String::from("555-0100"),
        daily_wage: dec!(50),
        current_balance: None,
        hire_date: Some(String::from("2023-06-01")),
    }
}

pub fn create_test_employee(store: &LedgerStore, name: &str) -> EmployeeInfo {
    add_employee(store, &create_valid_add_request(name), create_test_today())
        .expect("Failed to add test employee")
}

pub fn create_transaction_request(transaction_type: &str, amount: &str) -> ApplyTransactionRequest {
    ApplyTransactionRequest {
        transaction_type: transaction_type.to_string(),
        amount: amount.parse().expect("Test amount must be a decimal"),
        description: None,
        date: None,
    }
}

pub fn apply_test_transaction(
    store: &LedgerStore,
    employee_id: i64,
    transaction_type: &str,
    amount: &str,
) -> TransactionInfo {
    apply_transaction(
        store,
        employee_id,
        &create_transaction_request(transaction_type, amount),
        create_test_today(),
    )
    .expect("Failed to apply test transaction")
}
