// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Index listing and synchronous add.

use axum::{
	extract::{Query, State},
	response::Redirect,
	Form, Json,
};
use roster_server_api::{AlertLevel, AlertQuery, IndexResponse, NameForm, PersonResponse};
use roster_server_db::{DbError, Person};

use crate::{alert::redirect_home_with, api::AppState, error::ServerError, validation::validate_name};

#[utoipa::path(
    get,
    path = "/",
    params(AlertQuery),
    responses(
        (status = 200, description = "Everyone recorded so far", body = IndexResponse),
        (status = 500, description = "Database error", body = roster_server_api::ErrorResponse)
    ),
    tag = "people"
)]
/// GET / - List people, echoing any alert handed over by a redirect.
pub async fn index(
	State(state): State<AppState>,
	Query(query): Query<AlertQuery>,
) -> Result<Json<IndexResponse>, ServerError> {
	let people: Vec<PersonResponse> = state
		.people_repo
		.list()
		.await?
		.into_iter()
		.map(Into::into)
		.collect();

	Ok(Json(IndexResponse {
		alert: query.into_alert(),
		count: people.len(),
		people,
	}))
}

#[utoipa::path(
    post,
    path = "/add",
    request_body(content = NameForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect home with a success or danger alert"),
        (status = 400, description = "Invalid name", body = roster_server_api::ErrorResponse)
    ),
    tag = "people"
)]
/// POST /add - Record a person right away.
#[tracing::instrument(skip(state, form), fields(name = %form.name))]
pub async fn add_person(
	State(state): State<AppState>,
	Form(form): Form<NameForm>,
) -> Result<Redirect, ServerError> {
	let name = validate_name(&form.name)?;
	let exists = || {
		redirect_home_with(
			format!("{name} already exists in the database!"),
			AlertLevel::Danger,
		)
	};

	if state.people_repo.find_by_name(&name).await?.is_some() {
		return Ok(exists());
	}

	match state.people_repo.create(&Person::new(name.clone())).await {
		Ok(()) => {
			tracing::info!("person added");
			Ok(redirect_home_with(
				format!("{name} was added to the database!"),
				AlertLevel::Success,
			))
		}
		Err(DbError::Conflict(_)) => Ok(exists()),
		Err(e) => Err(e.into()),
	}
}
