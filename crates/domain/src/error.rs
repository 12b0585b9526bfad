// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Employee name is empty or invalid.
    InvalidName(String),
    /// A monetary amount is malformed (too many decimal places, out of range).
    InvalidAmount(String),
    /// A transaction amount is zero or negative.
    NonPositiveAmount {
        /// The rejected amount, rendered with two decimal places.
        amount: String,
    },
    /// Daily wage must not be negative.
    NegativeDailyWage {
        /// The rejected wage, rendered with two decimal places.
        amount: String,
    },
    /// Transaction type is not one of the closed set.
    InvalidTransactionType(String),
    /// Attendance status is not one of the closed set.
    InvalidAttendanceStatus(String),
    /// Payment status is not one of the closed set.
    InvalidPaymentStatus(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a time of day from a string.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A reporting date range ends before it starts.
    InvalidDateRange {
        /// The first day of the range.
        start: time::Date,
        /// The last day of the range.
        end: time::Date,
    },
    /// Check-out time precedes check-in time.
    InvalidShiftTimes {
        /// The check-in time.
        check_in: time::Time,
        /// The check-out time.
        check_out: time::Time,
    },
    /// Applying an amount would overflow the stored balance range.
    BalanceOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidAmount(msg) => write!(f, "Invalid amount: {msg}"),
            Self::NonPositiveAmount { amount } => {
                write!(f, "Transaction amount must be positive, got {amount}")
            }
            Self::NegativeDailyWage { amount } => {
                write!(f, "Daily wage must not be negative, got {amount}")
            }
            Self::InvalidTransactionType(value) => write!(
                f,
                "Invalid transaction type '{value}'. Must be one of: payment, deduction, bonus"
            ),
            Self::InvalidAttendanceStatus(value) => write!(
                f,
                "Invalid attendance status '{value}'. Must be 'present' or 'absent'"
            ),
            Self::InvalidPaymentStatus(value) => write!(
                f,
                "Invalid payment status '{value}'. Must be one of: pending, paid, deferred"
            ),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Date range start {start} is after end {end}")
            }
            Self::InvalidShiftTimes {
                check_in,
                check_out,
            } => {
                write!(
                    f,
                    "Check-out time {check_out} is before check-in time {check_in}"
                )
            }
            Self::BalanceOverflow { operation } => {
                write!(f, "Balance overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
