// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::{JobError, Result};
use crate::job::Job;
use crate::types::JobSnapshot;

/// Live jobs keyed by name. At most one job exists per name.
///
/// Backed by a sharded map: operations on different names only contend when
/// they hash to the same shard, and no shard lock outlives a single call.
#[derive(Debug, Default)]
pub struct JobRegistry {
	jobs: DashMap<String, Arc<Job>>,
}

impl JobRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the live job for `name`, creating it in `Starting` if absent.
	///
	/// The boolean is `true` only for the caller that created the job.
	#[instrument(skip(self))]
	pub fn try_create(&self, name: &str) -> (Arc<Job>, bool) {
		match self.jobs.entry(name.to_string()) {
			Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
			Entry::Vacant(entry) => {
				let job = Arc::new(Job::new(name));
				entry.insert(Arc::clone(&job));
				debug!("job created");
				(job, true)
			}
		}
	}

	pub fn get(&self, name: &str) -> Result<Arc<Job>> {
		self.jobs
			.get(name)
			.map(|entry| Arc::clone(entry.value()))
			.ok_or_else(|| JobError::NotFound(name.to_string()))
	}

	/// Remove a job that has reached a terminal status.
	///
	/// # Errors
	/// `JobError::StillActive` if the job is still starting or running,
	/// `JobError::NotFound` if there is no job for `name`.
	#[instrument(skip(self))]
	pub fn remove(&self, name: &str) -> Result<Arc<Job>> {
		if let Some((_, job)) = self.jobs.remove_if(name, |_, job| job.is_terminal()) {
			info!("job removed");
			return Ok(job);
		}

		if self.jobs.contains_key(name) {
			Err(JobError::StillActive(name.to_string()))
		} else {
			Err(JobError::NotFound(name.to_string()))
		}
	}

	pub fn len(&self) -> usize {
		self.jobs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.jobs.is_empty()
	}

	/// Number of jobs that have not reached a terminal status.
	pub fn active_count(&self) -> usize {
		self.jobs
			.iter()
			.filter(|entry| !entry.value().is_terminal())
			.count()
	}

	/// Snapshots of every live job, sorted by name.
	pub fn snapshots(&self) -> Vec<JobSnapshot> {
		let jobs: Vec<Arc<Job>> = self
			.jobs
			.iter()
			.map(|entry| Arc::clone(entry.value()))
			.collect();
		let mut snapshots: Vec<_> = jobs.iter().map(|job| job.snapshot()).collect();
		snapshots.sort_by(|a, b| a.name.cmp(&b.name));
		snapshots
	}

	/// Drop terminal jobs that finished more than `ttl` ago. Returns how many were evicted.
	#[instrument(skip(self))]
	pub fn evict_finished(&self, ttl: Duration) -> usize {
		let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
		let now = Utc::now();
		let before = self.jobs.len();

		self.jobs.retain(|_, job| match job.finished_at() {
			Some(finished_at) if job.is_terminal() => {
				now.signed_duration_since(finished_at) < ttl
			}
			_ => true,
		});

		let evicted = before.saturating_sub(self.jobs.len());
		if evicted > 0 {
			info!(evicted, "evicted finished jobs");
		}
		evicted
	}

	/// Trip the cancellation token of every job that is still running.
	pub fn cancel_all(&self) -> usize {
		let mut cancelled = 0;
		for entry in self.jobs.iter() {
			if !entry.value().is_terminal() {
				entry.value().cancel();
				cancelled += 1;
			}
		}
		cancelled
	}
}
