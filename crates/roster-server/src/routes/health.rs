// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use roster_server_api::{HealthResponse, HealthStatus, JobsHealth};

use crate::api::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Database reachability, people count and job counters.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let (database, people, database_error) = match state.people_repo.count().await {
		Ok(count) => (HealthStatus::Healthy, Some(count), None),
		Err(e) => {
			tracing::warn!(error = %e, "health check: counting people failed");
			(HealthStatus::Unhealthy, None, Some(e.to_string()))
		}
	};

	let response = HealthResponse {
		status: database,
		version: env!("CARGO_PKG_VERSION").to_string(),
		database,
		database_error,
		people,
		jobs: JobsHealth {
			total: state.registry.len(),
			active: state.registry.active_count(),
		},
	};

	let http_status = match database {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
