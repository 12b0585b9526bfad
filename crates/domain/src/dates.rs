// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date and time-of-day text formats.
//!
//! Dates travel as ISO 8601 calendar dates (`2024-01-15`) and shift times as
//! `HH:MM` or `HH:MM:SS`. The store keeps the same text so that lexical order
//! matches chronological order.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");
const SHORT_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Parses an ISO 8601 calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    // Numeric-only format: does not fail for a valid `Date`.
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Parses a time of day given as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string matches neither form.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    let trimmed: &str = value.trim();
    Time::parse(trimmed, TIME_FORMAT)
        .or_else(|_| Time::parse(trimmed, SHORT_TIME_FORMAT))
        .map_err(|e| DomainError::TimeParseError {
            time_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a time of day as `HH:MM:SS`.
#[must_use]
pub fn format_time(time: Time) -> String {
    time.format(TIME_FORMAT)
        .unwrap_or_else(|_| time.to_string())
}
