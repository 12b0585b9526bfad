// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time};

/// Settlement state of an employee's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Balance outstanding. Default for new employees.
    #[default]
    Pending,
    /// Account settled.
    Paid,
    /// Payment postponed by agreement.
    Deferred,
}

impl PaymentStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Deferred => "deferred",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "deferred" => Ok(Self::Deferred),
            _ => Err(DomainError::InvalidPaymentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Daily attendance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    /// Also the reported state when no record exists for the day.
    #[default]
    Absent,
}

impl AttendanceStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            _ => Err(DomainError::InvalidAttendanceStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of financial transaction recorded in the ledger.
///
/// The set is closed. Money handed to an employee is always a `Payment`;
/// reporting surfaces today's payments under the name "withdrawals", and the
/// string `"withdrawal"` is not accepted as a separate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money paid out to the employee. Reduces the balance.
    Payment,
    /// Penalty or charge against the employee. Reduces the balance.
    Deduction,
    /// Extra earnings credited to the employee. Increases the balance.
    Bonus,
}

impl TransactionType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Deduction => "deduction",
            Self::Bonus => "bonus",
        }
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(Self::Payment),
            "deduction" => Ok(Self::Deduction),
            "bonus" => Ok(Self::Bonus),
            _ => Err(DomainError::InvalidTransactionType(s.to_string())),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three balance figures kept on an employee row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balances {
    /// Signed running balance owed to the employee.
    pub current_balance: Money,
    /// Audit accumulator of all bonuses ever applied. Never decreases.
    pub total_bonuses: Money,
    /// Audit accumulator of all deductions ever applied. Never decreases.
    pub total_deductions: Money,
}

/// A persisted employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// The identifier assigned by the store.
    pub employee_id: i64,
    pub name: String,
    pub position: String,
    pub phone: String,
    pub daily_wage: Money,
    pub balances: Balances,
    pub payment_status: PaymentStatus,
    /// Soft-delete flag. Inactive employees keep their history.
    pub is_active: bool,
    pub hire_date: Date,
    pub last_payment_date: Option<Date>,
}

/// Fields for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub position: String,
    pub phone: String,
    pub daily_wage: Money,
    /// Balance carried in from outside the ledger. Usually zero.
    pub opening_balance: Money,
    pub hire_date: Date,
}

/// A partial update to an employee.
///
/// The field set is closed: balances, accumulators, the active flag and the
/// last payment date only change through ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub daily_wage: Option<Money>,
    pub payment_status: Option<PaymentStatus>,
    pub hire_date: Option<Date>,
}

impl EmployeePatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position.is_none()
            && self.phone.is_none()
            && self.daily_wage.is_none()
            && self.payment_status.is_none()
            && self.hire_date.is_none()
    }
}

/// A single day's attendance for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub attendance_id: i64,
    pub employee_id: i64,
    pub attendance_date: Date,
    pub status: AttendanceStatus,
    pub check_in_time: Option<Time>,
    pub check_out_time: Option<Time>,
    pub notes: Option<String>,
}

/// Request to record attendance for one employee on one day.
///
/// Optional fields left as `None` keep whatever an earlier mark stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceMark {
    pub employee_id: i64,
    pub attendance_date: Date,
    pub status: AttendanceStatus,
    pub check_in_time: Option<Time>,
    pub check_out_time: Option<Time>,
    pub notes: Option<String>,
}

/// An immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialTransaction {
    /// Strictly increasing identifier assigned by the store.
    pub transaction_id: i64,
    pub employee_id: i64,
    pub transaction_type: TransactionType,
    /// Positive magnitude; the sign comes from `transaction_type`.
    pub amount: Money,
    pub description: Option<String>,
    pub transaction_date: Date,
    /// Store timestamp of the insert.
    pub created_at: String,
}

/// A validated request to append a ledger entry.
///
/// Construct through [`NewTransaction::new`], which rejects non-positive
/// amounts before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    employee_id: i64,
    transaction_type: TransactionType,
    amount: Money,
    description: Option<String>,
    transaction_date: Date,
}

impl NewTransaction {
    /// Creates a validated transaction request.
    ///
    /// Blank descriptions are stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NonPositiveAmount` if `amount` is zero or negative.
    pub fn new(
        employee_id: i64,
        transaction_type: TransactionType,
        amount: Money,
        description: Option<String>,
        transaction_date: Date,
    ) -> Result<Self, DomainError> {
        crate::validation::validate_transaction_amount(amount)?;

        let description: Option<String> = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            employee_id,
            transaction_type,
            amount,
            description,
            transaction_date,
        })
    }

    #[must_use]
    pub const fn employee_id(&self) -> i64 {
        self.employee_id
    }

    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn transaction_date(&self) -> Date {
        self.transaction_date
    }
}

/// Result of zeroing an employee's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub employee_id: i64,
    /// The balance that was discarded. Not recorded in the ledger.
    pub settled_balance: Money,
    pub settled_on: Date,
}

/// Optional narrowing of the employee listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeFilter {
    pub payment_status: Option<PaymentStatus>,
    pub position: Option<String>,
}

/// Per-employee aggregates for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodayView {
    pub attendance: AttendanceStatus,
    /// Sum of the day's `payment` transactions.
    pub withdrawals: Money,
    pub bonuses: Money,
    pub deductions: Money,
}

/// An active employee joined with the day's aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeWithTodayView {
    pub employee: Employee,
    pub today: TodayView,
}

/// Attendance counts for one employee over a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub employee_id: i64,
    pub name: String,
    pub position: String,
    pub present_days: u32,
    pub absent_days: u32,
    /// Number of recorded days; unrecorded days are not counted.
    pub total_days: u32,
}

/// Totals over all active employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinancialSummary {
    pub total_employees: u32,
    pub total_daily_wages: Money,
    pub total_current_balance: Money,
    pub total_bonuses: Money,
    pub total_deductions: Money,
    pub paid_employees: u32,
    pub pending_employees: u32,
    pub deferred_employees: u32,
}
