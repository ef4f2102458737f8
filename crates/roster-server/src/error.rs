// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use roster_server_api::ErrorResponse;
use roster_server_db::DbError;
use roster_server_jobs::JobError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("Invalid request: {0}")]
	BadRequest(String),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Database error: {0}")]
	Database(#[from] DbError),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl From<JobError> for ServerError {
	fn from(e: JobError) -> Self {
		match e {
			JobError::NotFound(name) => ServerError::NotFound(name),
			JobError::Database(e) => ServerError::Database(e),
			other => ServerError::Internal(other.to_string()),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error, message) = match &self {
			ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
			ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
			ServerError::Database(e) => {
				tracing::error!(error = %e, "database error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"database_error",
					"A database error occurred".to_string(),
				)
			}
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"internal_error",
					"An internal error occurred".to_string(),
				)
			}
		};

		(
			status,
			Json(ErrorResponse {
				error: error.to_string(),
				message,
			}),
		)
			.into_response()
	}
}
