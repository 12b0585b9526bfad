// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module is limited to:
//! - Connection and pool initialization
//! - Migration execution
//! - SQLite-specific configuration (PRAGMA statements)

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_types::Integer;
use diesel::{RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::time::Duration;
use tracing::{debug, info};

use super::SqlitePool;
use crate::error::PersistenceError;

/// Embedded schema migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Helper row struct for PRAGMA queries.
///
/// This is a justified use of raw SQL as Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Per-connection settings applied every time the pool opens a connection.
///
/// `foreign_keys` and `busy_timeout` are connection-scoped in `SQLite`.
#[derive(Debug, Clone, Copy)]
pub struct SessionPragmas {
    pub busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SessionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
        diesel::sql_query("PRAGMA foreign_keys = ON")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        diesel::sql_query(format!(
            "PRAGMA busy_timeout = {}",
            self.busy_timeout.as_millis()
        ))
        .execute(conn)
        .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

/// Builds a connection pool for the given database URL.
///
/// # Arguments
///
/// * `database_url` - A file path or `SQLite` URI
/// * `max_size` - Maximum number of pooled connections
/// * `busy_timeout` - How long a connection waits for the write lock
/// * `connection_timeout` - How long a checkout waits for a free connection
///
/// # Errors
///
/// Returns an error if the initial connections cannot be opened.
pub fn build_pool(
    database_url: &str,
    max_size: u32,
    busy_timeout: Duration,
    connection_timeout: Duration,
) -> Result<SqlitePool, PersistenceError> {
    debug!(database_url, max_size, "Building SQLite connection pool");

    Pool::builder()
        .max_size(max_size)
        .connection_timeout(connection_timeout)
        // The last connection to a shared in-memory database owns its data.
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_customizer(Box::new(SessionPragmas { busy_timeout }))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))
}

/// Verifies that foreign key enforcement is enabled.
///
/// # Arguments
///
/// * `conn` - The database connection to check
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Run pending migrations on the provided connection.
///
/// # Arguments
///
/// * `conn` - A mutable reference to a Diesel `SqliteConnection`
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(
    conn: &mut SqliteConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Brings the schema up to date and checks foreign key enforcement.
///
/// # Arguments
///
/// * `conn` - A connection obtained from the store's pool
///
/// # Errors
///
/// Returns an error if migration fails or foreign keys are not enforced.
pub fn initialize_schema(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    run_migrations(conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    verify_foreign_key_enforcement(conn)
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// WAL (Write-Ahead Logging) lets readers proceed while a writer holds the
/// lock. The setting is persistent in the database file.
///
/// # Arguments
///
/// * `database_url` - The database file path
///
/// # Errors
///
/// Returns an error if the connection or the PRAGMA statement fails.
pub fn enable_wal_mode(database_url: &str) -> Result<(), PersistenceError> {
    info!("Enabling WAL journal mode at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}
