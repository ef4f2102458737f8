// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Named background jobs for Roster server.
//!
//! A job is keyed by the person's name it works on. Its status and log can be
//! read at any time while a spawned task drives it to completion; finished jobs
//! stay queryable until removed or evicted by the reaper.

pub mod context;
pub mod error;
pub mod job;
pub mod reaper;
pub mod registry;
pub mod runner;
pub mod types;

pub use context::CancellationToken;
pub use error::{JobError, Result};
pub use job::Job;
pub use reaper::JobReaper;
pub use registry::JobRegistry;
pub use runner::{JobRunner, RecordStore};
pub use types::{JobOutcome, JobSnapshot, JobStatus, LogEntry};
