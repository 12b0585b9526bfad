// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::Money;
use crate::types::{AttendanceMark, EmployeePatch, NewEmployee};
use time::Date;

/// Validates the fields of a new employee.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or whitespace
/// - The daily wage is negative
pub fn validate_new_employee(employee: &NewEmployee) -> Result<(), DomainError> {
    validate_name(&employee.name)?;
    validate_daily_wage(employee.daily_wage)?;
    Ok(())
}

/// Validates the fields present in an employee patch.
///
/// # Errors
///
/// Returns an error if a provided name is blank or a provided wage is negative.
pub fn validate_employee_patch(patch: &EmployeePatch) -> Result<(), DomainError> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(daily_wage) = patch.daily_wage {
        validate_daily_wage(daily_wage)?;
    }
    Ok(())
}

/// Validates that a transaction amount is strictly positive.
///
/// # Errors
///
/// Returns `DomainError::NonPositiveAmount` for zero or negative amounts.
pub fn validate_transaction_amount(amount: Money) -> Result<(), DomainError> {
    if !amount.is_positive() {
        return Err(DomainError::NonPositiveAmount {
            amount: amount.to_string(),
        });
    }
    Ok(())
}

/// Validates the shift times on an attendance mark.
///
/// # Errors
///
/// Returns `DomainError::InvalidShiftTimes` if both times are given and
/// check-out precedes check-in.
pub fn validate_attendance_mark(mark: &AttendanceMark) -> Result<(), DomainError> {
    if let (Some(check_in), Some(check_out)) = (mark.check_in_time, mark.check_out_time)
        && check_out < check_in
    {
        return Err(DomainError::InvalidShiftTimes {
            check_in,
            check_out,
        });
    }
    Ok(())
}

/// Validates an inclusive reporting range.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `start` is after `end`.
pub fn validate_date_range(start: Date, end: Date) -> Result<(), DomainError> {
    if start > end {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

fn validate_daily_wage(daily_wage: Money) -> Result<(), DomainError> {
    if daily_wage.is_negative() {
        return Err(DomainError::NegativeDailyWage {
            amount: daily_wage.to_string(),
        });
    }
    Ok(())
}
