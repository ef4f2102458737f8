// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a background job. Transitions only move forward:
/// `Starting -> Running -> {Complete, Failed, Cancelled}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
	Starting,
	Running,
	Complete,
	Failed,
	Cancelled,
}

impl JobStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			JobStatus::Starting => "starting",
			JobStatus::Running => "running",
			JobStatus::Complete => "complete",
			JobStatus::Failed => "failed",
			JobStatus::Cancelled => "cancelled",
		}
	}

	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			JobStatus::Complete | JobStatus::Failed | JobStatus::Cancelled
		)
	}

	fn rank(&self) -> u8 {
		match self {
			JobStatus::Starting => 0,
			JobStatus::Running => 1,
			JobStatus::Complete | JobStatus::Failed | JobStatus::Cancelled => 2,
		}
	}

	pub fn can_transition_to(&self, next: JobStatus) -> bool {
		next.rank() > self.rank()
	}
}

impl std::fmt::Display for JobStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for JobStatus {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"starting" => Ok(JobStatus::Starting),
			"running" => Ok(JobStatus::Running),
			"complete" => Ok(JobStatus::Complete),
			"failed" => Ok(JobStatus::Failed),
			"cancelled" => Ok(JobStatus::Cancelled),
			_ => Err(format!("unknown job status: {s}")),
		}
	}
}

/// What a completed job ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
	Created,
	AlreadyExists,
}

impl JobOutcome {
	pub fn as_str(&self) -> &'static str {
		match self {
			JobOutcome::Created => "created",
			JobOutcome::AlreadyExists => "already_exists",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
	pub at: DateTime<Utc>,
	pub message: String,
}

impl LogEntry {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			at: Utc::now(),
			message: message.into(),
		}
	}
}

impl std::fmt::Display for LogEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}: {}",
			self.at.to_rfc3339_opts(SecondsFormat::Secs, true),
			self.message
		)
	}
}

/// A consistent, point-in-time copy of a job's state.
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
	pub name: String,
	pub status: JobStatus,
	pub outcome: Option<JobOutcome>,
	pub error: Option<String>,
	pub created_at: DateTime<Utc>,
	pub finished_at: Option<DateTime<Utc>>,
	/// Index of the first entry in `log` within the job's full log.
	pub log_offset: usize,
	pub log: Vec<LogEntry>,
}
