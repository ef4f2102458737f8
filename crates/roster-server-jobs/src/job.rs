// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::context::CancellationToken;
use crate::types::{JobOutcome, JobSnapshot, JobStatus, LogEntry};

#[derive(Debug)]
struct JobState {
	status: JobStatus,
	outcome: Option<JobOutcome>,
	error: Option<String>,
	finished_at: Option<DateTime<Utc>>,
	log: Vec<LogEntry>,
}

/// One named background job.
///
/// The name is fixed at construction. Status, outcome and log live behind a
/// single lock so readers always get a consistent snapshot; the lock is never
/// held across an `.await`.
#[derive(Debug)]
pub struct Job {
	name: String,
	created_at: DateTime<Utc>,
	cancellation_token: CancellationToken,
	state: RwLock<JobState>,
}

impl Job {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			created_at: Utc::now(),
			cancellation_token: CancellationToken::new(),
			state: RwLock::new(JobState {
				status: JobStatus::Starting,
				outcome: None,
				error: None,
				finished_at: None,
				log: Vec::new(),
			}),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn cancellation_token(&self) -> &CancellationToken {
		&self.cancellation_token
	}

	/// Request cancellation; the runner stops at its next step boundary.
	pub fn cancel(&self) {
		self.cancellation_token.cancel();
	}

	fn read(&self) -> RwLockReadGuard<'_, JobState> {
		self.state.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, JobState> {
		self.state.write().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn status(&self) -> JobStatus {
		self.read().status
	}

	pub fn is_terminal(&self) -> bool {
		self.status().is_terminal()
	}

	pub fn finished_at(&self) -> Option<DateTime<Utc>> {
		self.read().finished_at
	}

	/// Move to `status` if that is a forward transition. Returns whether it applied.
	pub fn set_status(&self, status: JobStatus) -> bool {
		let mut state = self.write();
		Self::transition(&mut state, status)
	}

	fn transition(state: &mut JobState, status: JobStatus) -> bool {
		if !state.status.can_transition_to(status) {
			tracing::debug!(from = %state.status, to = %status, "ignoring non-forward status change");
			return false;
		}
		state.status = status;
		if status.is_terminal() {
			state.finished_at = Some(Utc::now());
		}
		true
	}

	pub fn append_log(&self, message: impl Into<String>) {
		self.write().log.push(LogEntry::new(message));
	}

	pub fn complete(&self, outcome: JobOutcome) -> bool {
		let mut state = self.write();
		let applied = Self::transition(&mut state, JobStatus::Complete);
		if applied {
			state.outcome = Some(outcome);
		}
		applied
	}

	pub fn fail(&self, error: impl Into<String>) -> bool {
		let mut state = self.write();
		let applied = Self::transition(&mut state, JobStatus::Failed);
		if applied {
			state.error = Some(error.into());
		}
		applied
	}

	pub fn mark_cancelled(&self) -> bool {
		Self::transition(&mut self.write(), JobStatus::Cancelled)
	}

	pub fn snapshot(&self) -> JobSnapshot {
		self.snapshot_since(0)
	}

	/// Snapshot carrying only the log entries from index `offset` onwards.
	pub fn snapshot_since(&self, offset: usize) -> JobSnapshot {
		let state = self.read();
		let log_offset = offset.min(state.log.len());
		JobSnapshot {
			name: self.name.clone(),
			status: state.status,
			outcome: state.outcome,
			error: state.error.clone(),
			created_at: self.created_at,
			finished_at: state.finished_at,
			log_offset,
			log: state.log[log_offset..].to_vec(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_job_is_starting_with_empty_log() {
		let job = Job::new("Ada");
		let snapshot = job.snapshot();
		assert_eq!(snapshot.name, "Ada");
		assert_eq!(snapshot.status, JobStatus::Starting);
		assert!(snapshot.log.is_empty());
		assert!(snapshot.outcome.is_none());
		assert!(snapshot.finished_at.is_none());
	}

	#[test]
	fn test_status_never_moves_backward() {
		let job = Job::new("Ada");
		assert!(job.set_status(JobStatus::Running));
		assert!(!job.set_status(JobStatus::Starting));
		assert_eq!(job.status(), JobStatus::Running);
	}

	#[test]
	fn test_complete_records_outcome_and_finish_time() {
		let job = Job::new("Ada");
		job.set_status(JobStatus::Running);
		assert!(job.complete(JobOutcome::Created));

		let snapshot = job.snapshot();
		assert_eq!(snapshot.status, JobStatus::Complete);
		assert_eq!(snapshot.outcome, Some(JobOutcome::Created));
		assert!(snapshot.finished_at.is_some());
	}

	#[test]
	fn test_terminal_status_is_sticky() {
		let job = Job::new("Ada");
		assert!(job.fail("disk on fire"));
		assert!(!job.complete(JobOutcome::Created));
		assert!(!job.mark_cancelled());

		let snapshot = job.snapshot();
		assert_eq!(snapshot.status, JobStatus::Failed);
		assert_eq!(snapshot.error.as_deref(), Some("disk on fire"));
		assert!(snapshot.outcome.is_none());
	}

	#[test]
	fn test_log_preserves_append_order() {
		let job = Job::new("Ada");
		for i in 0..5 {
			job.append_log(format!("step {i}"));
		}
		let messages: Vec<_> = job.snapshot().log.into_iter().map(|e| e.message).collect();
		assert_eq!(messages, vec!["step 0", "step 1", "step 2", "step 3", "step 4"]);
	}

	#[test]
	fn test_snapshot_since_returns_suffix() {
		let job = Job::new("Ada");
		job.append_log("one");
		job.append_log("two");
		job.append_log("three");

		let snapshot = job.snapshot_since(1);
		assert_eq!(snapshot.log_offset, 1);
		assert_eq!(snapshot.log.len(), 2);
		assert_eq!(snapshot.log[0].message, "two");

		let past_end = job.snapshot_since(10);
		assert_eq!(past_end.log_offset, 3);
		assert!(past_end.log.is_empty());
	}

	#[test]
	fn test_cancel_trips_token() {
		let job = Job::new("Ada");
		job.cancel();
		assert!(job.cancellation_token().is_cancelled());
		assert_eq!(job.status(), JobStatus::Starting);
	}
}
