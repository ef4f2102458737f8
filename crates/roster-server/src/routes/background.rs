// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{extract::State, response::Redirect, Form};
use roster_server_api::NameForm;
use std::sync::Arc;

use crate::{alert::redirect_to_status, api::AppState, error::ServerError, validation::validate_name};

#[utoipa::path(
    post,
    path = "/background",
    request_body(content = NameForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the job's status view"),
        (status = 400, description = "Invalid name", body = roster_server_api::ErrorResponse)
    ),
    tag = "jobs"
)]
/// POST /background - Start the job for a name, or join the one already running.
#[tracing::instrument(skip(state, form), fields(name = %form.name))]
pub async fn start_background(
	State(state): State<AppState>,
	Form(form): Form<NameForm>,
) -> Result<Redirect, ServerError> {
	let name = validate_name(&form.name)?;
	let (job, created) = state.registry.try_create(&name);

	if created {
		state.runner.spawn(Arc::clone(&job));
		tracing::info!("background job started");
	} else {
		tracing::debug!(status = %job.status(), "job already exists");
	}

	Ok(redirect_to_status(job.name()))
}
