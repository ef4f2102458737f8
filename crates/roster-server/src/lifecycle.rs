// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Serving and shutdown.
//!
//! Shutdown runs in two phases: stop accepting and let in-flight requests
//! finish, then cancel background jobs and wait for them to settle. Each phase
//! is bounded by the grace period it is given.

use axum::{http::StatusCode, Router};
use roster_server_jobs::JobRegistry;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Wrap `router` with request tracing and a per-request timeout that answers 408.
pub fn with_http_layers(router: Router, request_timeout: Duration) -> Router {
	router
		.layer(TimeoutLayer::with_status_code(
			StatusCode::REQUEST_TIMEOUT,
			request_timeout,
		))
		.layer(TraceLayer::new_for_http())
}

/// Serve `app` until `signal` resolves, then drain open connections for at most `grace`.
///
/// Returns early with the server's error if it stops on its own.
pub async fn serve_until<F>(
	listener: TcpListener,
	app: Router,
	signal: F,
	grace: Duration,
) -> std::io::Result<()>
where
	F: Future<Output = ()> + Send,
{
	let (drain_tx, drain_rx) = oneshot::channel::<()>();
	let mut server = tokio::spawn(async move {
		axum::serve(listener, app)
			.with_graceful_shutdown(async move {
				let _ = drain_rx.await;
			})
			.await
	});

	tokio::select! {
		result = &mut server => return result.map_err(std::io::Error::other)?,
		_ = signal => {}
	}

	info!(grace_ms = grace.as_millis() as u64, "Received shutdown signal, draining connections");
	let _ = drain_tx.send(());

	match tokio::time::timeout(grace, &mut server).await {
		Ok(result) => result.map_err(std::io::Error::other)?,
		Err(_) => {
			warn!("Graceful timeout elapsed with requests still in flight");
			server.abort();
			Ok(())
		}
	}
}

/// Cancel every job and wait up to `grace` for them to reach a terminal status.
///
/// Returns `true` if no job was left running.
pub async fn shutdown_jobs(registry: &JobRegistry, grace: Duration) -> bool {
	let cancelled = registry.cancel_all();
	info!(cancelled, "Cancelling background jobs...");

	let drained = tokio::time::timeout(grace, async {
		while registry.active_count() > 0 {
			tokio::time::sleep(Duration::from_millis(20)).await;
		}
	})
	.await;

	if drained.is_err() {
		warn!(
			remaining = registry.active_count(),
			"Graceful timeout elapsed with jobs still running"
		);
		return false;
	}
	true
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{body::Body, http::Request, routing::get};
	use std::sync::Arc;
	use tokio::io::{AsyncReadExt, AsyncWriteExt};
	use tower::ServiceExt;

	fn slow_router(delay: Duration) -> Router {
		Router::new().route(
			"/slow",
			get(move || async move {
				tokio::time::sleep(delay).await;
				"done"
			}),
		)
	}

	async fn send_get(addr: std::net::SocketAddr, path: &str) -> tokio::net::TcpStream {
		let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
		let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
		stream.write_all(request.as_bytes()).await.unwrap();
		stream
	}

	#[tokio::test]
	async fn test_request_timeout_answers_408() {
		let app = with_http_layers(slow_router(Duration::from_secs(60)), Duration::from_millis(50));

		let response = app
			.oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
	}

	#[tokio::test]
	async fn test_in_flight_request_finishes_after_signal() {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let (signal_tx, signal_rx) = oneshot::channel::<()>();
		let server = tokio::spawn(serve_until(
			listener,
			slow_router(Duration::from_millis(300)),
			async move {
				let _ = signal_rx.await;
			},
			Duration::from_secs(5),
		));

		let mut stream = send_get(addr, "/slow").await;
		tokio::time::sleep(Duration::from_millis(100)).await;
		signal_tx.send(()).unwrap();

		let mut response = String::new();
		stream.read_to_string(&mut response).await.unwrap();
		assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
		assert!(response.ends_with("done"));

		tokio::time::timeout(Duration::from_secs(5), server)
			.await
			.expect("server should stop after draining")
			.unwrap()
			.unwrap();
	}

	#[tokio::test]
	async fn test_drain_is_bounded_by_grace() {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let (signal_tx, signal_rx) = oneshot::channel::<()>();
		let server = tokio::spawn(serve_until(
			listener,
			slow_router(Duration::from_secs(60)),
			async move {
				let _ = signal_rx.await;
			},
			Duration::from_millis(100),
		));

		let _stream = send_get(addr, "/slow").await;
		tokio::time::sleep(Duration::from_millis(50)).await;
		signal_tx.send(()).unwrap();

		tokio::time::timeout(Duration::from_secs(5), server)
			.await
			.expect("grace period should bound the drain")
			.unwrap()
			.unwrap();
	}

	#[tokio::test]
	async fn test_shutdown_jobs_waits_for_cancelled_jobs() {
		let registry = Arc::new(JobRegistry::new());
		let (job, _) = registry.try_create("Ada");
		let worker = Arc::clone(&job);
		tokio::spawn(async move {
			worker.cancellation_token().cancelled().await;
			worker.mark_cancelled();
		});

		assert!(shutdown_jobs(&registry, Duration::from_secs(5)).await);
		assert_eq!(registry.active_count(), 0);
	}

	#[tokio::test]
	async fn test_shutdown_jobs_gives_up_after_grace() {
		let registry = JobRegistry::new();
		registry.try_create("Stuck");

		assert!(!shutdown_jobs(&registry, Duration::from_millis(50)).await);
		assert_eq!(registry.active_count(), 1);
	}
}
