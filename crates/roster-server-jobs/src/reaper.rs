// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::registry::JobRegistry;

/// Periodically evicts jobs that finished longer than `finished_ttl` ago.
pub struct JobReaper {
	registry: Arc<JobRegistry>,
	finished_ttl: Duration,
	interval: Duration,
	shutdown_tx: broadcast::Sender<()>,
	handle: Mutex<Option<JoinHandle<()>>>,
}

impl JobReaper {
	pub fn new(registry: Arc<JobRegistry>, finished_ttl: Duration, interval: Duration) -> Self {
		let (shutdown_tx, _) = broadcast::channel(1);
		Self {
			registry,
			finished_ttl,
			interval,
			shutdown_tx,
			handle: Mutex::new(None),
		}
	}

	/// Start the sweep loop. Calling `start` on a running reaper is a no-op.
	#[instrument(skip(self))]
	pub async fn start(&self) {
		let mut handle = self.handle.lock().await;
		if handle.is_some() {
			return;
		}

		let registry = Arc::clone(&self.registry);
		let ttl = self.finished_ttl;
		let interval = self.interval;
		let mut shutdown_rx = self.shutdown_tx.subscribe();

		*handle = Some(tokio::spawn(async move {
			loop {
				tokio::select! {
					_ = tokio::time::sleep(interval) => {
						let evicted = registry.evict_finished(ttl);
						debug!(evicted, remaining = registry.len(), "reaper sweep");
					}
					_ = shutdown_rx.recv() => {
						break;
					}
				}
			}
		}));

		info!(
			ttl_secs = ttl.as_secs(),
			interval_secs = interval.as_secs(),
			"Job reaper started"
		);
	}

	#[instrument(skip(self))]
	pub async fn shutdown(&self) {
		let _ = self.shutdown_tx.send(());

		if let Some(handle) = self.handle.lock().await.take() {
			let _ = handle.await;
		}

		info!("Job reaper shut down");
	}
}
