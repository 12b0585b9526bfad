// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The transaction engine.
//!
//! Appending a ledger row and applying its balance effect happen in one
//! `BEGIN IMMEDIATE` unit. The write lock is held from the balance read to the
//! commit, so concurrent units on the same employee cannot lose an update. If
//! any step fails the whole unit rolls back and the ledger row disappears with
//! it.

use diesel::prelude::*;
use diesel::SqliteConnection;
use staff_ledger_domain::{BalanceEffect, Balances, FinancialTransaction, NewTransaction};
use tracing::{info, warn};

use crate::data_models::{BalanceRow, NewTransactionRow, TransactionRow};
use crate::diesel_schema::{employees, financial_transactions};
use crate::error::PersistenceError;

/// Appends a transaction and applies its effect to the employee's balances.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transaction` - A validated transaction request
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee is absent or
/// inactive, a validation error if a balance would overflow, or a database
/// error. In every error case nothing is written.
pub fn apply_transaction(
    conn: &mut SqliteConnection,
    transaction: &NewTransaction,
) -> Result<FinancialTransaction, PersistenceError> {
    let employee_id: i64 = transaction.employee_id();

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let current: Option<BalanceRow> = employees::table
            .filter(employees::employee_id.eq(employee_id))
            .filter(employees::is_active.eq(1))
            .select(BalanceRow::as_select())
            .first(conn)
            .optional()?;

        let Some(current) = current else {
            warn!(employee_id, "Transaction targeted a missing or inactive employee");
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        };

        let effect: BalanceEffect =
            BalanceEffect::for_transaction(transaction.transaction_type(), transaction.amount())?;
        let updated: Balances = effect.apply_to(&Balances::from(current))?;

        let row: TransactionRow = diesel::insert_into(financial_transactions::table)
            .values(NewTransactionRow::from(transaction))
            .returning(TransactionRow::as_returning())
            .get_result(conn)?;

        let affected: usize = diesel::update(
            employees::table
                .filter(employees::employee_id.eq(employee_id))
                .filter(employees::is_active.eq(1)),
        )
        .set((
            employees::current_balance_cents.eq(updated.current_balance.cents()),
            employees::total_bonuses_cents.eq(updated.total_bonuses.cents()),
            employees::total_deductions_cents.eq(updated.total_deductions.cents()),
        ))
        .execute(conn)?;

        if affected == 0 {
            warn!(employee_id, "Employee vanished before balance update, rolling back");
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        }

        info!(
            transaction_id = row.transaction_id,
            employee_id,
            transaction_type = %transaction.transaction_type(),
            amount = %transaction.amount(),
            balance = %updated.current_balance,
            "Transaction applied"
        );

        FinancialTransaction::try_from(row)
    })
}
