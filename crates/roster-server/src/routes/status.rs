// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Polling and deleting background jobs.

use axum::{
	extract::{Path, Query, State},
	response::{IntoResponse, Redirect, Response},
	Form, Json,
};
use roster_server_api::{AlertLevel, JobStatusResponse, NameForm, StatusQuery};
use roster_server_jobs::JobError;

use crate::{
	alert::{redirect_home, redirect_home_with, redirect_to_status},
	api::AppState,
	error::ServerError,
	validation::validate_name,
};

fn missing_job(name: &str) -> Redirect {
	redirect_home_with(
		format!("Need to do a long submit for {name} first"),
		AlertLevel::Warning,
	)
}

#[utoipa::path(
    get,
    path = "/status/{name}",
    params(
        ("name" = String, Path, description = "Name the job was started for"),
        StatusQuery
    ),
    responses(
        (status = 200, description = "Current status and log", body = JobStatusResponse),
        (status = 303, description = "No job for this name; redirect home with a warning")
    ),
    tag = "jobs"
)]
/// GET /status/{name} - Read-only snapshot of a job.
pub async fn get_status(
	State(state): State<AppState>,
	Path(name): Path<String>,
	Query(query): Query<StatusQuery>,
) -> Response {
	match state.registry.get(&name) {
		Ok(job) => Json(JobStatusResponse::from(job.snapshot_since(query.since))).into_response(),
		Err(_) => missing_job(&name).into_response(),
	}
}

#[utoipa::path(
    post,
    path = "/status",
    request_body(content = NameForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Removed, cancelling, or nothing to delete"),
        (status = 400, description = "Invalid name", body = roster_server_api::ErrorResponse)
    ),
    tag = "jobs"
)]
/// POST /status - Delete a job.
///
/// Finished jobs are removed. A job still in progress is cancelled and the
/// client is sent back to its status view to watch it stop.
#[tracing::instrument(skip(state, form), fields(name = %form.name))]
pub async fn delete_status(
	State(state): State<AppState>,
	Form(form): Form<NameForm>,
) -> Result<Redirect, ServerError> {
	let name = validate_name(&form.name)?;

	match state.registry.remove(&name) {
		Ok(_) => Ok(redirect_home(None)),
		Err(JobError::StillActive(_)) => {
			if let Ok(job) = state.registry.get(&name) {
				job.cancel();
				tracing::info!("cancellation requested");
			}
			Ok(redirect_to_status(&name))
		}
		Err(JobError::NotFound(_)) => Ok(missing_job(&name)),
		Err(e) => Err(e.into()),
	}
}
