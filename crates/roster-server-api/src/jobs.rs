// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_server_jobs::{JobSnapshot, LogEntry};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LogEntryResponse {
	pub at: String,
	pub message: String,
	/// `"<timestamp>: <message>"`, ready for display.
	pub line: String,
}

impl From<LogEntry> for LogEntryResponse {
	fn from(entry: LogEntry) -> Self {
		Self {
			line: entry.to_string(),
			at: entry.at.to_rfc3339(),
			message: entry.message,
		}
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct JobStatusResponse {
	pub name: String,
	/// One of `starting`, `running`, `complete`, `failed`, `cancelled`.
	pub status: String,
	/// For complete jobs: `created` or `already_exists`.
	pub outcome: Option<String>,
	pub error: Option<String>,
	pub finished: bool,
	pub created_at: String,
	pub finished_at: Option<String>,
	pub log_offset: usize,
	/// Offset to pass as `since` on the next poll.
	pub next_offset: usize,
	pub log: Vec<LogEntryResponse>,
}

impl From<JobSnapshot> for JobStatusResponse {
	fn from(snapshot: JobSnapshot) -> Self {
		let next_offset = snapshot.log_offset + snapshot.log.len();
		Self {
			name: snapshot.name,
			status: snapshot.status.as_str().to_string(),
			outcome: snapshot.outcome.map(|o| o.as_str().to_string()),
			error: snapshot.error,
			finished: snapshot.status.is_terminal(),
			created_at: snapshot.created_at.to_rfc3339(),
			finished_at: snapshot.finished_at.map(|t| t.to_rfc3339()),
			log_offset: snapshot.log_offset,
			next_offset,
			log: snapshot.log.into_iter().map(Into::into).collect(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct StatusQuery {
	/// Only return log entries from this index onwards.
	#[serde(default)]
	pub since: usize,
}
