// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal_macros::dec;
use staff_ledger_domain::{Money, PaymentStatus, TransactionType};
use staff_ledger_persistence::LedgerStore;

use crate::{
    ApiError, ApplyTransactionRequest, EmployeeInfo, SettleAccountResponse, TransactionInfo,
    apply_transaction, delete_employee, get_employee, list_transactions, settle_account,
};

use super::helpers::{
    apply_test_transaction, create_test_employee, create_test_store, create_test_today,
    create_transaction_request,
};

fn assert_untouched(store: &LedgerStore, employee: &EmployeeInfo) {
    let fetched: EmployeeInfo = get_employee(store, employee.employee_id).unwrap();
    assert_eq!(fetched.current_balance, employee.current_balance);
    assert_eq!(fetched.total_bonuses, employee.total_bonuses);
    assert_eq!(fetched.total_deductions, employee.total_deductions);
    assert!(
        list_transactions(store, employee.employee_id)
            .unwrap()
            .is_empty()
    );
}

// ============================================================================
// Apply
// ============================================================================

#[test]
fn test_ledger_scenario_balances() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    apply_test_transaction(&store, employee.employee_id, "bonus", "100");
    apply_test_transaction(&store, employee.employee_id, "payment", "30");
    apply_test_transaction(&store, employee.employee_id, "deduction", "5");

    let fetched: EmployeeInfo = get_employee(&store, employee.employee_id).unwrap();
    assert_eq!(fetched.current_balance, Money::from_cents(6500));
    assert_eq!(fetched.total_bonuses, Money::from_cents(10000));
    assert_eq!(fetched.total_deductions, Money::from_cents(500));
}

#[test]
fn test_apply_transaction_returns_entry() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    let request: ApplyTransactionRequest = ApplyTransactionRequest {
        transaction_type: String::from("bonus"),
        amount: dec!(12.34),
        description: Some(String::from("  Weekend shift  ")),
        date: Some(String::from("2024-01-10")),
    };
    let entry: TransactionInfo =
        apply_transaction(&store, employee.employee_id, &request, create_test_today()).unwrap();

    assert!(entry.transaction_id > 0);
    assert_eq!(entry.employee_id, employee.employee_id);
    assert_eq!(entry.transaction_type, TransactionType::Bonus);
    assert_eq!(entry.amount, Money::from_cents(1234));
    assert_eq!(entry.description.as_deref(), Some("Weekend shift"));
    assert_eq!(entry.date, "2024-01-10");
}

#[test]
fn test_apply_transaction_defaults_date_to_today() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    let entry: TransactionInfo = apply_test_transaction(&store, employee.employee_id, "payment", "1");

    assert_eq!(entry.date, "2024-01-15");
}

#[test]
fn test_apply_transaction_rejects_withdrawal_type() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    let err: ApiError = apply_transaction(
        &store,
        employee.employee_id,
        &create_transaction_request("withdrawal", "10"),
        create_test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "transaction_type"));
    assert_untouched(&store, &employee);
}

#[test]
fn test_apply_transaction_rejects_zero_amount() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    let err: ApiError = apply_transaction(
        &store,
        employee.employee_id,
        &create_transaction_request("bonus", "0"),
        create_test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "amount"));
    assert_untouched(&store, &employee);
}

#[test]
fn test_apply_transaction_rejects_negative_amount() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    let err: ApiError = apply_transaction(
        &store,
        employee.employee_id,
        &create_transaction_request("payment", "-5"),
        create_test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "amount"));
    assert_untouched(&store, &employee);
}

#[test]
fn test_apply_transaction_rejects_sub_cent_amount() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    let err: ApiError = apply_transaction(
        &store,
        employee.employee_id,
        &create_transaction_request("bonus", "0.001"),
        create_test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "amount"));
    assert_untouched(&store, &employee);
}

#[test]
fn test_apply_transaction_unknown_employee_is_not_found() {
    let store: LedgerStore = create_test_store();

    let err: ApiError = apply_transaction(
        &store,
        999_999,
        &create_transaction_request("bonus", "10"),
        create_test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_apply_transaction_inactive_employee_is_not_found() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");
    delete_employee(&store, employee.employee_id).unwrap();

    let err: ApiError = apply_transaction(
        &store,
        employee.employee_id,
        &create_transaction_request("bonus", "10"),
        create_test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_list_transactions_in_id_order() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");
    apply_test_transaction(&store, employee.employee_id, "bonus", "10");
    apply_test_transaction(&store, employee.employee_id, "payment", "4");
    apply_test_transaction(&store, employee.employee_id, "deduction", "1");

    let entries: Vec<TransactionInfo> = list_transactions(&store, employee.employee_id).unwrap();

    let types: Vec<TransactionType> = entries.iter().map(|e| e.transaction_type).collect();
    assert_eq!(
        types,
        vec![
            TransactionType::Bonus,
            TransactionType::Payment,
            TransactionType::Deduction
        ]
    );
    assert!(
        entries
            .windows(2)
            .all(|pair| pair[0].transaction_id < pair[1].transaction_id)
    );
}

// ============================================================================
// Settlement
// ============================================================================

#[test]
fn test_settle_account_zeroes_balance_and_keeps_accumulators() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");
    apply_test_transaction(&store, employee.employee_id, "bonus", "100");
    apply_test_transaction(&store, employee.employee_id, "deduction", "5");

    let response: SettleAccountResponse =
        settle_account(&store, employee.employee_id, create_test_today()).unwrap();

    assert!(response.success);
    assert_eq!(response.settled_amount, Money::from_cents(9500));
    assert_eq!(response.settled_on, "2024-01-15");

    let fetched: EmployeeInfo = get_employee(&store, employee.employee_id).unwrap();
    assert_eq!(fetched.current_balance, Money::ZERO);
    assert_eq!(fetched.total_bonuses, Money::from_cents(10000));
    assert_eq!(fetched.total_deductions, Money::from_cents(500));
    assert_eq!(fetched.payment_status, PaymentStatus::Paid);
    assert_eq!(fetched.last_payment_date.as_deref(), Some("2024-01-15"));
}

#[test]
fn test_settle_account_unknown_employee_is_not_found() {
    let store: LedgerStore = create_test_store();

    let err: ApiError = settle_account(&store, 999_999, create_test_today()).unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}
