// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Roster server.
//!
//! An HTTP service that records people in SQLite, either synchronously or via
//! a named background job whose status and log can be polled while it runs.

pub mod alert;
pub mod api;
pub mod api_docs;
pub mod error;
pub mod lifecycle;
pub mod routes;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::ServerError;
pub use roster_server_config::ServerConfig;
