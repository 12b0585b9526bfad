// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account settlement.
//!
//! Settlement discards the outstanding balance. It writes no ledger row, so
//! the settled amount is only visible in the returned [`Settlement`] and in
//! the server log.

use diesel::prelude::*;
use diesel::SqliteConnection;
use staff_ledger_domain::{
    Balances, Money, SETTLED_STATUS, Settlement, format_date, settle_balances,
};
use time::Date;
use tracing::{info, warn};

use crate::data_models::BalanceRow;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Zeroes the balance, marks the account paid and stamps `today` as the last
/// payment date.
///
/// Inactive employees can be settled. Settling an already settled account on
/// the same day changes nothing.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee to settle
/// * `today` - The business date recorded as `last_payment_date`
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee does not exist.
pub fn settle_account(
    conn: &mut SqliteConnection,
    employee_id: i64,
    today: Date,
) -> Result<Settlement, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let current: Option<BalanceRow> = employees::table
            .filter(employees::employee_id.eq(employee_id))
            .select(BalanceRow::as_select())
            .first(conn)
            .optional()?;

        let Some(current) = current else {
            warn!(employee_id, "Settlement targeted a missing employee");
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        };

        let before: Balances = Balances::from(current);
        let after: Balances = settle_balances(&before);

        diesel::update(employees::table.filter(employees::employee_id.eq(employee_id)))
            .set((
                employees::current_balance_cents.eq(after.current_balance.cents()),
                employees::payment_status.eq(SETTLED_STATUS.as_str()),
                employees::last_payment_date.eq(Some(format_date(today))),
            ))
            .execute(conn)?;

        let settled_balance: Money = before.current_balance;
        info!(
            employee_id,
            settled_balance = %settled_balance,
            settled_on = %today,
            "Account settled"
        );

        Ok(Settlement {
            employee_id,
            settled_balance,
            settled_on: today,
        })
    })
}
