// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal_macros::dec;
use serde_json::json;
use staff_ledger_persistence::LedgerStore;

use crate::{
    ApiError, EmployeeInfo, PatchBodyError, UpdateEmployeeRequest, get_employee,
    parse_update_body, update_employee,
};

use super::helpers::{create_test_employee, create_test_store};

#[test]
fn test_parse_update_body_accepts_known_fields() {
    let request: UpdateEmployeeRequest = parse_update_body(json!({
        "name": "Alicia",
        "daily_wage": "60.50",
        "payment_status": "deferred"
    }))
    .unwrap();

    assert_eq!(request.name.as_deref(), Some("Alicia"));
    assert_eq!(request.daily_wage, Some(dec!(60.50)));
    assert_eq!(request.payment_status.as_deref(), Some("deferred"));
    assert_eq!(request.position, None);
}

#[test]
fn test_parse_update_body_accepts_numeric_wage() {
    let request: UpdateEmployeeRequest = parse_update_body(json!({ "daily_wage": 42 })).unwrap();

    assert_eq!(request.daily_wage, Some(dec!(42)));
}

#[test]
fn test_parse_update_body_rejects_balance_field() {
    let err: PatchBodyError = parse_update_body(json!({
        "name": "Alicia",
        "current_balance": "1000000"
    }))
    .unwrap_err();

    assert!(matches!(err, PatchBodyError::UnknownField { ref field, .. } if field == "current_balance"));
}

#[test]
fn test_parse_update_body_rejects_is_active() {
    let err: PatchBodyError = parse_update_body(json!({ "is_active": true })).unwrap_err();

    assert!(matches!(err, PatchBodyError::UnknownField { .. }));
}

#[test]
fn test_parse_update_body_rejects_non_object() {
    let err: PatchBodyError = parse_update_body(json!(["name", "Alicia"])).unwrap_err();

    assert_eq!(err, PatchBodyError::NotAnObject);
}

#[test]
fn test_parse_update_body_rejects_wrong_value_type() {
    let err: PatchBodyError = parse_update_body(json!({ "name": 7 })).unwrap_err();

    assert!(matches!(err, PatchBodyError::InvalidValue { .. }));
}

#[test]
fn test_unknown_field_error_names_field() {
    let err: ApiError = ApiError::from(PatchBodyError::UnknownField {
        field: String::from("total_bonuses"),
        allowed: String::from("name"),
    });

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "total_bonuses"));
}

#[test]
fn test_empty_update_body_leaves_employee_unchanged() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");

    let request: UpdateEmployeeRequest = parse_update_body(json!({})).unwrap();
    let updated: EmployeeInfo = update_employee(&store, employee.employee_id, &request).unwrap();

    assert_eq!(updated, employee);
    assert_eq!(get_employee(&store, employee.employee_id).unwrap(), employee);
}
