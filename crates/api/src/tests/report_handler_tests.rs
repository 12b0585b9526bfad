// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use staff_ledger_domain::Money;
use staff_ledger_persistence::LedgerStore;

use crate::{
    ApiError, AttendanceReportRequest, AttendanceReportResponse, EmployeeInfo,
    FinancialSummaryResponse, MarkAttendanceRequest, StoreStatusResponse, TodayPayoutsResponse,
    attendance_report, financial_summary, mark_attendance, settle_account, store_status,
    today_payouts,
};

use super::helpers::{
    apply_test_transaction, create_test_employee, create_test_store, create_test_today,
};

fn mark_on(store: &LedgerStore, employee_id: i64, date: &str, status: &str) {
    let request: MarkAttendanceRequest = MarkAttendanceRequest {
        status: status.to_string(),
        date: Some(date.to_string()),
        check_in_time: None,
        check_out_time: None,
        notes: None,
    };
    mark_attendance(store, employee_id, &request, create_test_today()).unwrap();
}

#[test]
fn test_attendance_report_counts_recorded_days_in_range() {
    let store: LedgerStore = create_test_store();
    let employee: EmployeeInfo = create_test_employee(&store, "Alice");
    mark_on(&store, employee.employee_id, "2024-01-01", "present");
    mark_on(&store, employee.employee_id, "2024-01-02", "absent");
    mark_on(&store, employee.employee_id, "2024-01-03", "present");
    mark_on(&store, employee.employee_id, "2024-02-01", "present");

    let report: AttendanceReportResponse = attendance_report(
        &store,
        &AttendanceReportRequest {
            start: String::from("2024-01-01"),
            end: String::from("2024-01-31"),
        },
    )
    .unwrap();

    assert_eq!(report.start, "2024-01-01");
    assert_eq!(report.end, "2024-01-31");
    assert_eq!(report.employees.len(), 1);
    assert_eq!(report.employees[0].present_days, 2);
    assert_eq!(report.employees[0].absent_days, 1);
    assert_eq!(report.employees[0].total_days, 3);
}

#[test]
fn test_attendance_report_rejects_inverted_range() {
    let store: LedgerStore = create_test_store();

    let err: ApiError = attendance_report(
        &store,
        &AttendanceReportRequest {
            start: String::from("2024-02-01"),
            end: String::from("2024-01-01"),
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "date_range"));
}

#[test]
fn test_attendance_report_rejects_malformed_start() {
    let store: LedgerStore = create_test_store();

    let err: ApiError = attendance_report(
        &store,
        &AttendanceReportRequest {
            start: String::from("January"),
            end: String::from("2024-01-31"),
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "start"));
}

#[test]
fn test_financial_summary_totals() {
    let store: LedgerStore = create_test_store();
    let alice: EmployeeInfo = create_test_employee(&store, "Alice");
    let bob: EmployeeInfo = create_test_employee(&store, "Bob");
    apply_test_transaction(&store, alice.employee_id, "bonus", "100");
    apply_test_transaction(&store, bob.employee_id, "deduction", "5");
    settle_account(&store, alice.employee_id, create_test_today()).unwrap();

    let summary: FinancialSummaryResponse = financial_summary(&store).unwrap();

    assert_eq!(summary.total_employees, 2);
    assert_eq!(summary.total_daily_wages, Money::from_cents(10000));
    assert_eq!(summary.total_current_balance, Money::from_cents(-500));
    assert_eq!(summary.total_bonuses, Money::from_cents(10000));
    assert_eq!(summary.total_deductions, Money::from_cents(500));
    assert_eq!(summary.paid_employees, 1);
    assert_eq!(summary.pending_employees, 1);
    assert_eq!(summary.deferred_employees, 0);
}

#[test]
fn test_today_payouts_sums_payments_only() {
    let store: LedgerStore = create_test_store();
    let alice: EmployeeInfo = create_test_employee(&store, "Alice");
    let bob: EmployeeInfo = create_test_employee(&store, "Bob");
    apply_test_transaction(&store, alice.employee_id, "payment", "30");
    apply_test_transaction(&store, bob.employee_id, "payment", "12.50");
    apply_test_transaction(&store, bob.employee_id, "bonus", "99");

    let payouts: TodayPayoutsResponse = today_payouts(&store, create_test_today()).unwrap();

    assert_eq!(payouts.date, "2024-01-15");
    assert_eq!(payouts.total_payouts, Money::from_cents(4250));
}

#[test]
fn test_store_status_reports_available() {
    let store: LedgerStore = create_test_store();

    let status: StoreStatusResponse = store_status(&store);

    assert!(status.store_available);
}
