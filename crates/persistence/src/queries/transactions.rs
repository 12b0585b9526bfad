// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use staff_ledger_domain::FinancialTransaction;
use tracing::debug;

use crate::data_models::TransactionRow;
use crate::diesel_schema::financial_transactions;
use crate::error::PersistenceError;
use crate::queries::employees::employee_exists;

/// Lists every ledger row for an employee in id order.
///
/// Inactive employees keep their ledger and can still be listed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee does not exist.
pub fn list_transactions(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<FinancialTransaction>, PersistenceError> {
    debug!("Listing transactions for employee ID: {}", employee_id);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if !employee_exists(conn, employee_id)? {
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        }

        let rows: Vec<TransactionRow> = financial_transactions::table
            .filter(financial_transactions::employee_id.eq(employee_id))
            .order(financial_transactions::transaction_id.asc())
            .select(TransactionRow::as_select())
            .load(conn)?;

        rows.into_iter().map(FinancialTransaction::try_from).collect()
    })
}
