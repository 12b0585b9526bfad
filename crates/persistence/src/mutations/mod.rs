// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the ledger store.
//!
//! ## Module Organization
//!
//! - `employees`: Employee creation, closed-patch updates, soft delete
//! - `transactions`: The transaction engine
//! - `attendance`: The attendance register
//! - `settlement`: Account settlement
//!
//! Every function that touches a balance or an attendance record runs inside
//! `immediate_transaction`, so the write lock is held from the first read.

pub mod attendance;
pub mod employees;
pub mod settlement;
pub mod transactions;
