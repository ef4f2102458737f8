// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	routing::{get, post},
	Router,
};
use roster_server_config::ServerConfig;
use roster_server_db::PersonRepository;
use roster_server_jobs::{JobReaper, JobRegistry, JobRunner};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::routes;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub people_repo: Arc<PersonRepository>,
	pub registry: Arc<JobRegistry>,
	pub runner: JobRunner,
	pub reaper: Arc<JobReaper>,
}

/// Wire repositories, the job registry, the runner and the reaper together.
///
/// The reaper is created stopped; the binary starts it.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let people_repo = Arc::new(PersonRepository::new(pool.clone()));
	let registry = Arc::new(JobRegistry::new());
	let runner = JobRunner::new(people_repo.clone(), config.jobs.step_delay());
	let reaper = Arc::new(JobReaper::new(
		Arc::clone(&registry),
		config.jobs.finished_ttl(),
		config.jobs.reap_interval(),
	));

	AppState {
		pool,
		people_repo,
		registry,
		runner,
		reaper,
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(routes::people::index))
		.route("/add", post(routes::people::add_person))
		.route("/background", post(routes::background::start_background))
		.route("/status", post(routes::status::delete_status))
		.route("/status/{name}", get(routes::status::get_status))
		.route("/health", get(routes::health::health_check))
		.route("/api/openapi.json", get(routes::docs::openapi_json))
		.with_state(state)
}
