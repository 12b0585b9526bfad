// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal_macros::dec;
use serde_json::{Value, json};
use staff_ledger_persistence::LedgerStore;

use crate::{
    AddEmployeeRequest, ApplyTransactionRequest, EmployeeInfo, EmployeeWithTodayInfo,
    ListEmployeesRequest, TransactionInfo, list_employees,
};

use super::helpers::{
    apply_test_transaction, create_test_employee, create_test_store, create_test_today,
};

#[test]
fn test_employee_money_serializes_with_two_decimals() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    let value: Value = serde_json::to_value(&employee).unwrap();

    assert_eq!(value["daily_wage"], json!("50.00"));
    assert_eq!(value["current_balance"], json!("0.00"));
    assert_eq!(value["payment_status"], json!("pending"));
    assert_eq!(value["hire_date"], json!("2023-06-01"));
}

#[test]
fn test_today_view_is_flattened_into_employee() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");
    apply_test_transaction(&store, employee.employee_id, "payment", "30");

    let listed: Vec<EmployeeWithTodayInfo> =
        list_employees(&store, &ListEmployeesRequest::default(), create_test_today()).unwrap();
    let value: Value = serde_json::to_value(&listed[0]).unwrap();

    assert_eq!(value["name"], json!("Alice"));
    assert_eq!(value["current_balance"], json!("-30.00"));
    assert_eq!(value["today_attendance"], json!("absent"));
    assert_eq!(value["today_withdrawals"], json!("30.00"));
    assert_eq!(value["today_bonuses"], json!("0.00"));
}

#[test]
fn test_transaction_type_serializes_as_type() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");
    let entry: TransactionInfo = apply_test_transaction(&store, employee.employee_id, "bonus", "5");

    let value: Value = serde_json::to_value(&entry).unwrap();

    assert_eq!(value["type"], json!("bonus"));
    assert_eq!(value["amount"], json!("5.00"));
    assert!(value.get("transaction_type").is_none());
}

#[test]
fn test_apply_request_reads_type_key() {
    let request: ApplyTransactionRequest = serde_json::from_value(json!({
        "type": "deduction",
        "amount": 7.25,
        "description": "Broken comb"
    }))
    .unwrap();

    assert_eq!(request.transaction_type, "deduction");
    assert_eq!(request.amount, dec!(7.25));
    assert_eq!(request.date, None);
}

#[test]
fn test_add_request_defaults_phone() {
    let request: AddEmployeeRequest = serde_json::from_value(json!({
        "name": "Alice",
        "position": "Stylist",
        "daily_wage": "50"
    }))
    .unwrap();

    assert_eq!(request.phone, "");
    assert_eq!(request.current_balance, None);
    assert_eq!(request.hire_date, None);
}
