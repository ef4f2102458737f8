// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use roster_server_db::{DbError, Person, PersonRepository};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::error::{JobError, Result};
use crate::job::Job;
use crate::types::{JobOutcome, JobStatus};

/// Persistence the runner needs: look a person up by name, record a new one.
#[async_trait]
pub trait RecordStore: Send + Sync {
	async fn find_by_name(&self, name: &str) -> std::result::Result<Option<Person>, DbError>;
	async fn create(&self, person: &Person) -> std::result::Result<(), DbError>;
}

#[async_trait]
impl RecordStore for PersonRepository {
	async fn find_by_name(&self, name: &str) -> std::result::Result<Option<Person>, DbError> {
		PersonRepository::find_by_name(self, name).await
	}

	async fn create(&self, person: &Person) -> std::result::Result<(), DbError> {
		PersonRepository::create(self, person).await
	}
}

/// Drives a [`Job`] through the simulated "record this person" workflow.
#[derive(Clone)]
pub struct JobRunner {
	store: Arc<dyn RecordStore>,
	step_delay: Duration,
}

impl JobRunner {
	pub fn new(store: Arc<dyn RecordStore>, step_delay: Duration) -> Self {
		Self { store, step_delay }
	}

	/// Run `job` on the tokio runtime. The returned handle may be dropped.
	pub fn spawn(&self, job: Arc<Job>) -> JoinHandle<()> {
		let runner = self.clone();
		tokio::spawn(async move { runner.run(&job).await })
	}

	/// Run `job` to a terminal status. Never panics on store failures.
	#[instrument(skip(self, job), fields(job = %job.name()))]
	pub async fn run(&self, job: &Job) {
		match self.execute(job).await {
			Ok(outcome) => {
				job.complete(outcome);
				info!(outcome = outcome.as_str(), "Job completed");
			}
			Err(JobError::Cancelled) => {
				job.append_log("Cancelled before finishing.");
				job.mark_cancelled();
				info!("Job cancelled");
			}
			Err(e) => {
				let message = e.to_string();
				job.append_log(format!("Something went wrong: {message}"));
				job.fail(message.clone());
				warn!(error = %message, "Job failed");
			}
		}
	}

	async fn execute(&self, job: &Job) -> Result<JobOutcome> {
		let name = job.name();

		self.step(job).await?;
		job.set_status(JobStatus::Running);
		job.append_log(format!("Checking if {name} exists in the database..."));

		self.step(job).await?;
		if self.store.find_by_name(name).await?.is_some() {
			job.append_log(format!("{name} already exists in the database!!!"));
			return Ok(JobOutcome::AlreadyExists);
		}

		job.append_log(format!(
			"{name} doesn't exist! Proceeding with record creation..."
		));
		self.step(job).await?;
		job.append_log(format!(
			"Hmm... {name}?? Gonna take my time with this one..."
		));
		self.step(job).await?;
		let person = Person::new(name);
		job.append_log(format!("Ok, {name}. Almost done..."));
		self.step(job).await?;
		job.append_log(format!("Adding {name} to the database..."));

		match self.store.create(&person).await {
			Ok(()) => {}
			Err(DbError::Conflict(_)) => {
				job.append_log(format!(
					"{name} already exists in the database!!! Someone beat us to it."
				));
				return Ok(JobOutcome::AlreadyExists);
			}
			Err(e) => return Err(e.into()),
		}

		// The record is committed; a late cancel must not hide that.
		tokio::time::sleep(self.step_delay).await;
		job.append_log(format!("Congratulations, {name}! We're done..."));
		Ok(JobOutcome::Created)
	}

	/// One unit of simulated latency; also the cancellation checkpoint.
	async fn step(&self, job: &Job) -> Result<()> {
		let token = job.cancellation_token();
		if token.is_cancelled() {
			return Err(JobError::Cancelled);
		}

		tokio::select! {
			_ = tokio::time::sleep(self.step_delay) => Ok(()),
			_ = token.cancelled() => Err(JobError::Cancelled),
		}
	}
}
