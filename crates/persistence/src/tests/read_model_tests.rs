// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Today view tests.

use staff_ledger_domain::{
    AttendanceMark, AttendanceStatus, Employee, EmployeeFilter, EmployeePatch,
    EmployeeWithTodayView, Money, NewEmployee, PaymentStatus, TodayView, TransactionType,
};
use time::macros::date;

use crate::LedgerStore;
use crate::tests::{
    apply_test_transaction, create_test_employee, create_test_new_employee, create_test_store,
    create_test_today, create_test_transaction,
};

fn list_all(store: &LedgerStore) -> Vec<EmployeeWithTodayView> {
    store
        .list_employees_with_today_view(&EmployeeFilter::default(), create_test_today())
        .unwrap()
}

#[test]
fn test_empty_store_lists_nothing() {
    let store: LedgerStore = create_test_store();
    assert!(list_all(&store).is_empty());
}

#[test]
fn test_defaults_when_nothing_happened_today() {
    let store: LedgerStore = create_test_store();
    let employee: Employee = create_test_employee(&store, "Alice");

    let views: Vec<EmployeeWithTodayView> = list_all(&store);
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].employee, employee);
    assert_eq!(views[0].today, TodayView::default());
    assert_eq!(views[0].today.attendance, AttendanceStatus::Absent);
    assert_eq!(views[0].today.withdrawals, Money::ZERO);
}

#[test]
fn test_today_sums_by_type() {
    let store: LedgerStore = create_test_store();
    let alice: Employee = create_test_employee(&store, "Alice");
    let bob: Employee = create_test_employee(&store, "Bob");

    apply_test_transaction(&store, alice.employee_id, TransactionType::Payment, Money::from_cents(1_000));
    apply_test_transaction(&store, alice.employee_id, TransactionType::Payment, Money::from_cents(500));
    apply_test_transaction(&store, alice.employee_id, TransactionType::Bonus, Money::from_cents(2_000));
    apply_test_transaction(&store, bob.employee_id, TransactionType::Deduction, Money::from_cents(300));

    // Yesterday's activity does not count.
    store
        .apply_transaction(&create_test_transaction(
            alice.employee_id,
            TransactionType::Bonus,
            Money::from_cents(9_999),
            date!(2024 - 01 - 14),
        ))
        .unwrap();

    store
        .mark_attendance(&AttendanceMark {
            employee_id: alice.employee_id,
            attendance_date: create_test_today(),
            status: AttendanceStatus::Present,
            check_in_time: None,
            check_out_time: None,
            notes: None,
        })
        .unwrap();

    let views: Vec<EmployeeWithTodayView> = list_all(&store);
    assert_eq!(views.len(), 2);

    let alice_view: &EmployeeWithTodayView = &views[0];
    assert_eq!(alice_view.employee.name, "Alice");
    assert_eq!(alice_view.today.attendance, AttendanceStatus::Present);
    assert_eq!(alice_view.today.withdrawals, Money::from_cents(1_500));
    assert_eq!(alice_view.today.bonuses, Money::from_cents(2_000));
    assert_eq!(alice_view.today.deductions, Money::ZERO);
    assert_eq!(
        alice_view.employee.balances.current_balance,
        Money::from_cents(9_999 + 2_000 - 1_500)
    );

    let bob_view: &EmployeeWithTodayView = &views[1];
    assert_eq!(bob_view.employee.name, "Bob");
    assert_eq!(bob_view.today.attendance, AttendanceStatus::Absent);
    assert_eq!(bob_view.today.withdrawals, Money::ZERO);
    assert_eq!(bob_view.today.deductions, Money::from_cents(300));
}

#[test]
fn test_ordered_by_name_and_excludes_inactive() {
    let store: LedgerStore = create_test_store();
    let carol: Employee = create_test_employee(&store, "Carol");
    create_test_employee(&store, "Alice");
    create_test_employee(&store, "Bob");
    assert!(store.soft_delete_employee(carol.employee_id).unwrap());
    create_test_employee(&store, "Dave");

    let names: Vec<String> = list_all(&store)
        .into_iter()
        .map(|view| view.employee.name)
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Dave"]);
}

#[test]
fn test_ordering_ignores_case_and_breaks_ties_by_id() {
    let store: LedgerStore = create_test_store();
    create_test_employee(&store, "bob");
    create_test_employee(&store, "Alice");
    let first_carol: Employee = create_test_employee(&store, "carol");
    create_test_employee(&store, "Dave");
    let second_carol: Employee = create_test_employee(&store, "Carol");

    let listed: Vec<(String, i64)> = list_all(&store)
        .into_iter()
        .map(|view| (view.employee.name, view.employee.employee_id))
        .collect();
    let names: Vec<&str> = listed.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "bob", "carol", "Carol", "Dave"]);
    assert_eq!(listed[2].1, first_carol.employee_id);
    assert_eq!(listed[3].1, second_carol.employee_id);
}

#[test]
fn test_filters_narrow_active_set() {
    let store: LedgerStore = create_test_store();
    let alice: Employee = create_test_employee(&store, "Alice");
    let barber: NewEmployee = NewEmployee {
        position: String::from("Barber"),
        ..create_test_new_employee("Bob")
    };
    store.insert_employee(&barber).unwrap();
    store
        .update_employee(
            alice.employee_id,
            &EmployeePatch {
                payment_status: Some(PaymentStatus::Deferred),
                ..EmployeePatch::default()
            },
        )
        .unwrap();

    let deferred: Vec<EmployeeWithTodayView> = store
        .list_employees_with_today_view(
            &EmployeeFilter {
                payment_status: Some(PaymentStatus::Deferred),
                position: None,
            },
            create_test_today(),
        )
        .unwrap();
    assert_eq!(deferred.len(), 1);
    assert_eq!(deferred[0].employee.name, "Alice");

    let barbers: Vec<EmployeeWithTodayView> = store
        .list_employees_with_today_view(
            &EmployeeFilter {
                payment_status: None,
                position: Some(String::from("Barber")),
            },
            create_test_today(),
        )
        .unwrap();
    assert_eq!(barbers.len(), 1);
    assert_eq!(barbers[0].employee.name, "Bob");

    let none: Vec<EmployeeWithTodayView> = store
        .list_employees_with_today_view(
            &EmployeeFilter {
                payment_status: Some(PaymentStatus::Paid),
                position: Some(String::from("Barber")),
            },
            create_test_today(),
        )
        .unwrap();
    assert!(none.is_empty());
}
