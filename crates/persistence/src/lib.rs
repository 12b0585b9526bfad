// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger store for the staff ledger.
//!
//! This crate persists employees, daily attendance and the append-only
//! financial ledger in `SQLite` through Diesel. It provides:
//!
//! - the store handle ([`LedgerStore`]) and its connection pool
//! - the transaction engine, the only path that changes a balance
//! - the attendance register (one record per employee per day)
//! - account settlement
//! - the read model that joins employees with the day's aggregates
//!
//! ## Concurrency
//!
//! Every balance-mutating unit runs inside `BEGIN IMMEDIATE`, which takes the
//! database write lock before the first read. Two units on the same employee
//! therefore serialize at the store, and a unit that fails part way rolls back
//! completely. There is no in-process locking; several processes may share
//! one database file.
//!
//! ## Dates
//!
//! No operation reads the wall clock. "Today" is always a parameter, so the
//! caller decides the business day and tests can fix it.
//!
//! ## Testing
//!
//! [`LedgerStore::open_in_memory`] gives each call its own shared-cache
//! in-memory database. Tests that need concurrent writers use a file
//! database, since shared-cache locking does not honour `busy_timeout`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::RunQueryDsl;
use staff_ledger_domain::{
    AttendanceMark, AttendanceRecord, AttendanceSummary, Employee, EmployeeFilter, EmployeePatch,
    EmployeeWithTodayView, FinancialSummary, FinancialTransaction, Money, NewEmployee,
    NewTransaction, Settlement,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use time::Date;
use tracing::{info, warn};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::{SqlitePool, SqlitePooledConnection};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `open_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Pool and locking settings for a file-backed store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long a writer waits for the database write lock.
    pub busy_timeout: Duration,
    /// How long an operation waits for a free pooled connection.
    pub connection_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pool_size: 8,
            busy_timeout: Duration::from_millis(5000),
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// Handle to the ledger store.
///
/// Cloning is cheap and every clone shares one connection pool. The pool, and
/// with it every connection, is closed when the last clone is dropped.
#[derive(Clone)]
pub struct LedgerStore {
    pool: SqlitePool,
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("LedgerStore")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

impl LedgerStore {
    /// Opens a store backed by a fresh in-memory database.
    ///
    /// The pool holds a single connection that is never recycled, so the
    /// database lives exactly as long as the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let config: StoreConfig = StoreConfig::default();
        let pool: SqlitePool = backend::sqlite::build_pool(
            &shared_memory_url,
            1,
            config.busy_timeout,
            config.connection_timeout,
        )?;

        Self::initialize(pool)
    }

    /// Opens a store backed by a database file, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    /// * `config` - Pool and locking settings
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open_file<P: AsRef<Path>>(path: P, config: &StoreConfig) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        if config.pool_size == 0 {
            return Err(PersistenceError::InitializationError(
                "Pool size must be at least 1".to_string(),
            ));
        }

        // Must happen before the pool opens its connections.
        backend::sqlite::enable_wal_mode(path_str)?;

        let pool: SqlitePool = backend::sqlite::build_pool(
            path_str,
            config.pool_size,
            config.busy_timeout,
            config.connection_timeout,
        )?;

        Self::initialize(pool)
    }

    fn initialize(pool: SqlitePool) -> Result<Self, PersistenceError> {
        let store: Self = Self { pool };
        let mut conn: SqlitePooledConnection = store.connection()?;
        backend::sqlite::initialize_schema(&mut conn)?;
        drop(conn);

        info!(?store, "Ledger store ready");
        Ok(store)
    }

    fn connection(&self) -> Result<SqlitePooledConnection, PersistenceError> {
        self.pool.get().map_err(|e| {
            warn!(error = %e, "Ledger store connection unavailable");
            PersistenceError::from(e)
        })
    }

    /// Reports whether the store can currently serve requests.
    ///
    /// Checks out a connection and runs a trivial query. Never fails; any
    /// error means `false`.
    #[must_use]
    pub fn is_store_available(&self) -> bool {
        let Ok(mut conn) = self.pool.get() else {
            return false;
        };
        diesel::sql_query("SELECT 1").execute(&mut conn).is_ok()
    }

    // ====================================================================
    // Employees
    // ====================================================================

    /// Retrieves an active employee by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the row is missing or
    /// the employee has been soft-deleted.
    pub fn get_employee(&self, employee_id: i64) -> Result<Employee, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        queries::employees::get_active_employee(&mut conn, employee_id)
    }

    /// Retrieves an employee row by id, including soft-deleted employees.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if no such row exists.
    pub fn get_employee_record(&self, employee_id: i64) -> Result<Employee, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        queries::employees::get_employee_record(&mut conn, employee_id)
    }

    /// Lists active employees joined with the aggregates for `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_employees_with_today_view(
        &self,
        filter: &EmployeeFilter,
        today: Date,
    ) -> Result<Vec<EmployeeWithTodayView>, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        queries::today_view::list_employees_with_today_view(&mut conn, filter, today)
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the insert fails.
    pub fn insert_employee(&self, employee: &NewEmployee) -> Result<Employee, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        mutations::employees::insert_employee(&mut conn, employee)
    }

    /// Applies a closed patch to an active employee.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the employee is absent
    /// or inactive, or a validation error for invalid field values.
    pub fn update_employee(
        &self,
        employee_id: i64,
        patch: &EmployeePatch,
    ) -> Result<Employee, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        mutations::employees::update_employee(&mut conn, employee_id, patch)
    }

    /// Soft-deletes an employee.
    ///
    /// Returns `false` if the employee was already inactive or does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn soft_delete_employee(&self, employee_id: i64) -> Result<bool, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        mutations::employees::soft_delete_employee(&mut conn, employee_id)
    }

    // ====================================================================
    // Ledger
    // ====================================================================

    /// Appends a transaction and applies its balance effect as one unit.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the employee is absent
    /// or inactive. On any error nothing is written.
    pub fn apply_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<FinancialTransaction, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        mutations::transactions::apply_transaction(&mut conn, transaction)
    }

    /// Lists an employee's ledger in id order.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the employee does not exist.
    pub fn list_transactions(
        &self,
        employee_id: i64,
    ) -> Result<Vec<FinancialTransaction>, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        queries::transactions::list_transactions(&mut conn, employee_id)
    }

    /// Zeroes an employee's balance and marks the account paid on `today`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the employee does not exist.
    pub fn settle_account(
        &self,
        employee_id: i64,
        today: Date,
    ) -> Result<Settlement, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        mutations::settlement::settle_account(&mut conn, employee_id, today)
    }

    // ====================================================================
    // Attendance
    // ====================================================================

    /// Records attendance for one employee on one day, overwriting any
    /// earlier mark for that day.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the employee is absent
    /// or inactive.
    pub fn mark_attendance(
        &self,
        mark: &AttendanceMark,
    ) -> Result<AttendanceRecord, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        mutations::attendance::mark_attendance(&mut conn, mark)
    }

    /// Lists an employee's attendance records in date order.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the employee does not exist.
    pub fn list_attendance(
        &self,
        employee_id: i64,
    ) -> Result<Vec<AttendanceRecord>, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        queries::attendance::list_attendance(&mut conn, employee_id)
    }

    // ====================================================================
    // Reports
    // ====================================================================

    /// Counts present and absent days per active employee in `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `start` is after `end`.
    pub fn attendance_report(
        &self,
        start: Date,
        end: Date,
    ) -> Result<Vec<AttendanceSummary>, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        queries::reports::attendance_report(&mut conn, start, end)
    }

    /// Totals balances and payment states over active employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn financial_summary(&self) -> Result<FinancialSummary, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        queries::reports::financial_summary(&mut conn)
    }

    /// Sums all payments dated `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn today_payout_total(&self, today: Date) -> Result<Money, PersistenceError> {
        let mut conn: SqlitePooledConnection = self.connection()?;
        queries::reports::today_payout_total(&mut conn, today)
    }
}
