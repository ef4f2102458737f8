// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_server_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum JobError {
	#[error("no active job for '{0}'")]
	NotFound(String),

	#[error("job '{0}' is still running")]
	StillActive(String),

	#[error("job was cancelled")]
	Cancelled,

	#[error(transparent)]
	Database(#[from] DbError),
}

pub type Result<T> = std::result::Result<T, JobError>;
