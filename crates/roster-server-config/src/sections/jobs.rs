// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background jobs configuration section.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_STEP_DELAY_MS: u64 = 3000;
const DEFAULT_FINISHED_TTL_SECS: u64 = 3600;
const DEFAULT_REAP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobsConfigLayer {
	pub step_delay_ms: Option<u64>,
	pub finished_ttl_secs: Option<u64>,
	pub reap_interval_secs: Option<u64>,
}

impl JobsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.step_delay_ms.is_some() {
			self.step_delay_ms = other.step_delay_ms;
		}
		if other.finished_ttl_secs.is_some() {
			self.finished_ttl_secs = other.finished_ttl_secs;
		}
		if other.reap_interval_secs.is_some() {
			self.reap_interval_secs = other.reap_interval_secs;
		}
	}

	pub fn finalize(self) -> JobsConfig {
		JobsConfig {
			step_delay_ms: self.step_delay_ms.unwrap_or(DEFAULT_STEP_DELAY_MS),
			finished_ttl_secs: self.finished_ttl_secs.unwrap_or(DEFAULT_FINISHED_TTL_SECS),
			reap_interval_secs: self.reap_interval_secs.unwrap_or(DEFAULT_REAP_INTERVAL_SECS),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobsConfig {
	/// Simulated latency between two runner steps.
	pub step_delay_ms: u64,
	/// How long a finished job stays pollable before eviction.
	pub finished_ttl_secs: u64,
	pub reap_interval_secs: u64,
}

impl JobsConfig {
	pub fn step_delay(&self) -> Duration {
		Duration::from_millis(self.step_delay_ms)
	}

	pub fn finished_ttl(&self) -> Duration {
		Duration::from_secs(self.finished_ttl_secs)
	}

	pub fn reap_interval(&self) -> Duration {
		Duration::from_secs(self.reap_interval_secs)
	}
}

impl Default for JobsConfig {
	fn default() -> Self {
		Self {
			step_delay_ms: DEFAULT_STEP_DELAY_MS,
			finished_ttl_secs: DEFAULT_FINISHED_TTL_SECS,
			reap_interval_secs: DEFAULT_REAP_INTERVAL_SECS,
		}
	}
}
