// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Concurrent writers against a file database.
//!
//! Shared-cache in-memory databases report lock conflicts immediately instead
//! of waiting on `busy_timeout`, so these tests use a temporary file.

use std::thread;
use std::time::Duration;

use staff_ledger_domain::{Employee, Money, TransactionType};

use crate::tests::{create_test_new_employee, create_test_today, create_test_transaction};
use crate::{LedgerStore, StoreConfig};

const WRITERS: i64 = 8;
const ROUNDS: i64 = 5;
const AMOUNT_CENTS: i64 = 1_250;

fn create_file_config() -> StoreConfig {
    StoreConfig {
        pool_size: 8,
        busy_timeout: Duration::from_secs(30),
        connection_timeout: Duration::from_secs(30),
    }
}

fn bonus_many(store: &LedgerStore, employee_id: i64) {
    for _ in 0..ROUNDS {
        store
            .apply_transaction(&create_test_transaction(
                employee_id,
                TransactionType::Bonus,
                Money::from_cents(AMOUNT_CENTS),
                create_test_today(),
            ))
            .unwrap();
    }
}

#[test]
fn test_concurrent_bonuses_on_one_employee_lose_no_update() {
    let dir = tempfile::tempdir().unwrap();
    let store: LedgerStore =
        LedgerStore::open_file(dir.path().join("ledger.db"), &create_file_config()).unwrap();
    let employee: Employee = store
        .insert_employee(&create_test_new_employee("Alice"))
        .unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let store: LedgerStore = store.clone();
            let employee_id: i64 = employee.employee_id;
            thread::spawn(move || bonus_many(&store, employee_id))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected: Money = Money::from_cents(WRITERS * ROUNDS * AMOUNT_CENTS);
    let updated: Employee = store.get_employee(employee.employee_id).unwrap();
    assert_eq!(updated.balances.current_balance, expected);
    assert_eq!(updated.balances.total_bonuses, expected);
    assert_eq!(
        store.list_transactions(employee.employee_id).unwrap().len(),
        usize::try_from(WRITERS * ROUNDS).unwrap()
    );
}

#[test]
fn test_separate_store_handles_on_one_file_serialize() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let first: LedgerStore = LedgerStore::open_file(&path, &create_file_config()).unwrap();
    let second: LedgerStore = LedgerStore::open_file(&path, &create_file_config()).unwrap();
    let employee: Employee = first
        .insert_employee(&create_test_new_employee("Alice"))
        .unwrap();

    let handles: Vec<_> = [first.clone(), second.clone()]
        .into_iter()
        .map(|store| {
            let employee_id: i64 = employee.employee_id;
            thread::spawn(move || bonus_many(&store, employee_id))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected: Money = Money::from_cents(2 * ROUNDS * AMOUNT_CENTS);
    assert_eq!(
        second
            .get_employee(employee.employee_id)
            .unwrap()
            .balances
            .current_balance,
        expected
    );
}

#[test]
fn test_concurrent_writers_on_different_employees() {
    let dir = tempfile::tempdir().unwrap();
    let store: LedgerStore =
        LedgerStore::open_file(dir.path().join("ledger.db"), &create_file_config()).unwrap();

    let employees: Vec<Employee> = ["Alice", "Bob", "Carol", "Dave"]
        .into_iter()
        .map(|name| store.insert_employee(&create_test_new_employee(name)).unwrap())
        .collect();

    let handles: Vec<_> = employees
        .iter()
        .map(|employee| {
            let store: LedgerStore = store.clone();
            let employee_id: i64 = employee.employee_id;
            thread::spawn(move || bonus_many(&store, employee_id))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for employee in employees {
        let updated: Employee = store.get_employee(employee.employee_id).unwrap();
        assert_eq!(
            updated.balances.current_balance,
            Money::from_cents(ROUNDS * AMOUNT_CENTS)
        );
    }
}
