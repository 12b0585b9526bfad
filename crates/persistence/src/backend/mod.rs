// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates connection setup, pooling, migration and the PRAGMA
//! statements that cannot be expressed in Diesel DSL. All ledger queries and
//! mutations live in `queries/` and `mutations/`.

pub mod sqlite;

use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};

/// Pool of `SQLite` connections shared by every clone of a store handle.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// A connection checked out of [`SqlitePool`].
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;
