// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for Roster server.
//!
//! SQLite persistence for people records, shared by the synchronous HTTP
//! handlers and the background job runner.

pub mod error;
pub mod migrations;
pub mod person;
pub mod pool;
pub mod testing;

pub use error::{DbError, Result};
pub use migrations::run_migrations;
pub use person::{Person, PersonRepository};
pub use pool::create_pool;
