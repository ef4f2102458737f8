// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Roster server binary.

use clap::{Parser, Subcommand};
use roster_server::lifecycle::{serve_until, shutdown_jobs, with_http_layers};
use roster_server::{create_app_state, create_router};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Roster server - records people, directly or through background jobs.
#[derive(Parser, Debug)]
#[command(name = "roster-server", about = "Roster people registry server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/roster/server.toml)
	#[arg(long, env = "ROSTER_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// How long shutdown may wait for open requests and running jobs, e.g. "10s"
	#[arg(long, value_parser = humantime::parse_duration)]
	graceful_timeout: Option<Duration>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("roster-server version: {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => roster_server_config::load_config_with_file(path)?,
		None => roster_server_config::load_config()?,
	};

	let json_logs = config.logging.json;
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
		.with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		step_delay_ms = config.jobs.step_delay_ms,
		"starting roster-server"
	);

	let pool =
		roster_server_db::create_pool(&config.database.url, config.database.max_connections).await?;
	roster_server_db::run_migrations(&pool).await?;

	let state = create_app_state(pool, &config);
	let registry = state.registry.clone();
	let reaper = state.reaper.clone();
	reaper.start().await;

	let app = with_http_layers(
		create_router(state),
		Duration::from_secs(config.http.request_timeout_secs),
	);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	let grace = args
		.graceful_timeout
		.unwrap_or_else(|| Duration::from_secs(config.http.graceful_shutdown_secs));
	let signal = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "Failed to listen for shutdown signal");
			std::future::pending::<()>().await;
		}
	};

	if let Err(e) = serve_until(listener, app, signal, grace).await {
		tracing::error!(error = %e, "Server error");
	}

	reaper.shutdown().await;
	shutdown_jobs(&registry, grace).await;

	tracing::info!("Server shutdown complete");
	Ok(())
}
