// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod concurrency_tests;
mod read_model_tests;

use rust_decimal_macros::dec;
use staff_ledger_domain::{
    Employee, FinancialTransaction, Money, NewEmployee, NewTransaction, TransactionType,
};
use time::Date;
use time::macros::date;

use crate::LedgerStore;

/// The business date most tests run on.
pub fn create_test_today() -> Date {
    date!(2024 - 01 - 15)
}

pub fn create_test_store() -> LedgerStore {
    LedgerStore::open_in_memory().expect("Failed to open in-memory store")
}

pub fn create_test_new_employee(name: &str) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        position: String::from("Stylist"),
        phone: String::from("555-0100"),
        daily_wage: Money::from_decimal(dec!(50)).unwrap(),
        opening_balance: Money::ZERO,
        hire_date: date!(2023 - 06 - 01),
    }
}

pub fn create_test_employee(store: &LedgerStore, name: &str) -> Employee {
    store
        .insert_employee(&create_test_new_employee(name))
        .expect("Failed to insert test employee")
}

pub fn create_test_transaction(
    employee_id: i64,
    transaction_type: TransactionType,
    amount: Money,
    date: Date,
) -> NewTransaction {
    NewTransaction::new(employee_id, transaction_type, amount, None, date)
        .expect("Test transaction must be valid")
}

pub fn apply_test_transaction(
    store: &LedgerStore,
    employee_id: i64,
    transaction_type: TransactionType,
    amount: Money,
) -> FinancialTransaction {
    store
        .apply_transaction(&create_test_transaction(
            employee_id,
            transaction_type,
            amount,
            create_test_today(),
        ))
        .expect("Failed to apply test transaction")
}
