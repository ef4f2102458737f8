// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP tests for the people and background-job routes.
//!
//! Each test gets its own on-disk SQLite database and a router built from
//! `create_app_state` with a short job step delay.

use axum::{
	body::Body,
	http::{header::LOCATION, Request, StatusCode},
	response::Response,
	Router,
};
use roster_server::{create_app_state, create_router, AppState, ServerConfig};
use roster_server_db::{Person, PersonRepository};
use roster_server_jobs::JobStatus;
use std::time::Duration;
use tempfile::tempdir;
use tower::ServiceExt;

async fn setup_test_app(step_delay_ms: u64) -> (Router, AppState, tempfile::TempDir) {
	let dir = tempdir().unwrap();
	let db_path = dir.path().join("roster_test.db");
	let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
	let pool = roster_server_db::create_pool(&db_url, 5).await.unwrap();
	roster_server_db::run_migrations(&pool).await.unwrap();

	let mut config = ServerConfig::default();
	config.jobs.step_delay_ms = step_delay_ms;
	let state = create_app_state(pool, &config);
	(create_router(state.clone()), state, dir)
}

fn form_request(uri: &str, name: &str) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header("Content-Type", "application/x-www-form-urlencoded")
		.body(Body::from(format!("name={}", urlencoding::encode(name))))
		.unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn location(response: &Response) -> String {
	response
		.headers()
		.get(LOCATION)
		.expect("redirect should carry a Location header")
		.to_str()
		.unwrap()
		.to_string()
}

async fn json_body(response: Response) -> serde_json::Value {
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

/// Poll `/status/{name}` until the job reports `finished`.
async fn wait_for_finish(app: &Router, name: &str) -> serde_json::Value {
	let uri = format!("/status/{}", urlencoding::encode(name));
	tokio::time::timeout(Duration::from_secs(10), async {
		loop {
			let response = app.clone().oneshot(get_request(&uri)).await.unwrap();
			assert_eq!(response.status(), StatusCode::OK);
			let status = json_body(response).await;
			if status["finished"] == true {
				return status;
			}
			tokio::time::sleep(Duration::from_millis(5)).await;
		}
	})
	.await
	.expect("job should finish")
}

// ============================================================================
// Index and synchronous add
// ============================================================================

#[tokio::test]
async fn test_index_starts_empty() {
	let (app, _state, _dir) = setup_test_app(1).await;

	let response = app.oneshot(get_request("/")).await.unwrap();
	assert_eq!(response.status(), StatusCode::OK);

	let index = json_body(response).await;
	assert_eq!(index["count"], 0);
	assert!(index["alert"].is_null());
}

#[tokio::test]
async fn test_index_echoes_alert_from_query() {
	let (app, _state, _dir) = setup_test_app(1).await;

	let response = app
		.oneshot(get_request("/?alert=Ada%20was%20added&level=success"))
		.await
		.unwrap();
	let index = json_body(response).await;
	assert_eq!(index["alert"]["message"], "Ada was added");
	assert_eq!(index["alert"]["level"], "success");
}

#[tokio::test]
async fn test_add_then_duplicate() {
	let (app, _state, _dir) = setup_test_app(1).await;

	let response = app.clone().oneshot(form_request("/add", "Ada")).await.unwrap();
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(
		location(&response),
		"/?alert=Ada%20was%20added%20to%20the%20database%21&level=success"
	);

	let response = app.clone().oneshot(form_request("/add", "Ada")).await.unwrap();
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(
		location(&response),
		"/?alert=Ada%20already%20exists%20in%20the%20database%21&level=danger"
	);

	let index = json_body(app.oneshot(get_request("/")).await.unwrap()).await;
	assert_eq!(index["count"], 1);
	assert_eq!(index["people"][0]["name"], "Ada");
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
	let (app, state, _dir) = setup_test_app(1).await;

	for uri in ["/add", "/background", "/status"] {
		let response = app.clone().oneshot(form_request(uri, "   ")).await.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
		let body = json_body(response).await;
		assert_eq!(body["error"], "bad_request");
	}
	assert!(state.registry.is_empty());
}

// ============================================================================
// Background jobs
// ============================================================================

#[tokio::test]
async fn test_background_creates_absent_person() {
	let (app, state, _dir) = setup_test_app(1).await;

	let response = app
		.clone()
		.oneshot(form_request("/background", "Ada"))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(location(&response), "/status/Ada");

	let status = wait_for_finish(&app, "Ada").await;
	assert_eq!(status["status"], "complete");
	assert_eq!(status["outcome"], "created");
	let log = status["log"].as_array().unwrap();
	assert_eq!(log[0]["message"], "Checking if Ada exists in the database...");
	assert_eq!(
		log.last().unwrap()["message"],
		"Congratulations, Ada! We're done..."
	);

	assert_eq!(state.people_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_background_for_existing_person_adds_nothing() {
	let (app, state, _dir) = setup_test_app(1).await;
	let repo = PersonRepository::new(state.pool.clone());
	repo.create(&Person::new("Ada")).await.unwrap();

	app.clone()
		.oneshot(form_request("/background", "Ada"))
		.await
		.unwrap();

	let status = wait_for_finish(&app, "Ada").await;
	assert_eq!(status["status"], "complete");
	assert_eq!(status["outcome"], "already_exists");
	assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_poll_unknown_name_redirects_with_warning() {
	let (app, state, _dir) = setup_test_app(1).await;

	let response = app.oneshot(get_request("/status/Ghost")).await.unwrap();
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(
		location(&response),
		"/?alert=Need%20to%20do%20a%20long%20submit%20for%20Ghost%20first&level=warning"
	);
	assert!(state.registry.is_empty());
}

#[tokio::test]
async fn test_concurrent_starts_share_one_job() {
	let (app, state, _dir) = setup_test_app(1).await;

	let (first, second) = tokio::join!(
		app.clone().oneshot(form_request("/background", "Grace")),
		app.clone().oneshot(form_request("/background", "Grace")),
	);
	let (first, second) = (first.unwrap(), second.unwrap());

	assert_eq!(location(&first), "/status/Grace");
	assert_eq!(location(&second), "/status/Grace");
	assert_eq!(state.registry.len(), 1);

	let status = wait_for_finish(&app, "Grace").await;
	assert_eq!(status["outcome"], "created");
	assert_eq!(state.people_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_status_since_returns_log_suffix() {
	let (app, _state, _dir) = setup_test_app(1).await;
	app.clone()
		.oneshot(form_request("/background", "Ada"))
		.await
		.unwrap();
	let full = wait_for_finish(&app, "Ada").await;
	let total = full["log"].as_array().unwrap().len();

	let response = app
		.oneshot(get_request("/status/Ada?since=2"))
		.await
		.unwrap();
	let partial = json_body(response).await;
	assert_eq!(partial["log_offset"], 2);
	assert_eq!(partial["next_offset"], total);
	assert_eq!(partial["log"].as_array().unwrap().len(), total - 2);
}

#[tokio::test]
async fn test_name_with_spaces_round_trips_through_redirect() {
	let (app, _state, _dir) = setup_test_app(1).await;

	let response = app
		.clone()
		.oneshot(form_request("/background", "Ada Lovelace"))
		.await
		.unwrap();
	assert_eq!(location(&response), "/status/Ada%20Lovelace");

	let status = wait_for_finish(&app, "Ada Lovelace").await;
	assert_eq!(status["name"], "Ada Lovelace");
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test]
async fn test_delete_finished_job_then_poll_redirects() {
	let (app, state, _dir) = setup_test_app(1).await;
	app.clone()
		.oneshot(form_request("/background", "Ada"))
		.await
		.unwrap();
	wait_for_finish(&app, "Ada").await;

	let response = app
		.clone()
		.oneshot(form_request("/status", "Ada"))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(location(&response), "/");
	assert!(state.registry.is_empty());

	let response = app.oneshot(get_request("/status/Ada")).await.unwrap();
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert!(location(&response).contains("level=warning"));
}

#[tokio::test]
async fn test_delete_running_job_cancels_it() {
	let (app, state, _dir) = setup_test_app(60_000).await;
	app.clone()
		.oneshot(form_request("/background", "Ada"))
		.await
		.unwrap();

	let response = app
		.clone()
		.oneshot(form_request("/status", "Ada"))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(location(&response), "/status/Ada");

	let status = wait_for_finish(&app, "Ada").await;
	assert_eq!(status["status"], "cancelled");
	assert_eq!(state.registry.get("Ada").unwrap().status(), JobStatus::Cancelled);
	assert_eq!(state.people_repo.count().await.unwrap(), 0);

	let response = app.oneshot(form_request("/status", "Ada")).await.unwrap();
	assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_delete_unknown_job_redirects_with_warning() {
	let (app, _state, _dir) = setup_test_app(1).await;

	let response = app.oneshot(form_request("/status", "Ghost")).await.unwrap();
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert!(location(&response).ends_with("level=warning"));
}

#[tokio::test]
async fn test_restart_after_delete_runs_fresh_job() {
	let (app, state, _dir) = setup_test_app(1).await;
	app.clone()
		.oneshot(form_request("/background", "Ada"))
		.await
		.unwrap();
	wait_for_finish(&app, "Ada").await;
	app.clone()
		.oneshot(form_request("/status", "Ada"))
		.await
		.unwrap();

	app.clone()
		.oneshot(form_request("/background", "Ada"))
		.await
		.unwrap();
	let status = wait_for_finish(&app, "Ada").await;
	assert_eq!(status["outcome"], "already_exists");
	assert_eq!(state.people_repo.count().await.unwrap(), 1);
}

// ============================================================================
// Health and docs
// ============================================================================

#[tokio::test]
async fn test_health_reports_database_and_jobs() {
	let (app, _state, _dir) = setup_test_app(1).await;

	let response = app.oneshot(get_request("/health")).await.unwrap();
	assert_eq!(response.status(), StatusCode::OK);

	let health = json_body(response).await;
	assert_eq!(health["status"], "healthy");
	assert_eq!(health["database"], "healthy");
	assert_eq!(health["jobs"]["total"], 0);
	assert_eq!(health["jobs"]["active"], 0);
	assert_eq!(health["people"], 0);
}

#[tokio::test]
async fn test_health_counts_recorded_people() {
	let (app, _state, _dir) = setup_test_app(1).await;

	for name in ["Ada", "Grace"] {
		let response = app.clone().oneshot(form_request("/add", name)).await.unwrap();
		assert_eq!(response.status(), StatusCode::SEE_OTHER);
	}

	let response = app.oneshot(get_request("/health")).await.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(json_body(response).await["people"], 2);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
	let (app, _state, _dir) = setup_test_app(1).await;

	let response = app.oneshot(get_request("/api/openapi.json")).await.unwrap();
	assert_eq!(response.status(), StatusCode::OK);

	let doc = json_body(response).await;
	assert!(doc["paths"].get("/background").is_some());
}
