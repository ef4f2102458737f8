// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP listener configuration.

use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 15;

/// HTTP configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
	/// Upper bound for a single request before the server answers 408.
	pub request_timeout_secs: u64,
	/// How long shutdown waits for in-flight background jobs.
	pub graceful_shutdown_secs: u64,
}

impl Default for HttpConfig {
	fn default() -> Self {
		HttpConfigLayer::default().finalize()
	}
}

/// HTTP configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HttpConfigLayer {
	#[serde(default)]
	pub host: Option<String>,
	#[serde(default)]
	pub port: Option<u16>,
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
	#[serde(default)]
	pub graceful_shutdown_secs: Option<u64>,
}

impl HttpConfigLayer {
	pub fn merge(&mut self, other: HttpConfigLayer) {
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.port.is_some() {
			self.port = other.port;
		}
		if other.request_timeout_secs.is_some() {
			self.request_timeout_secs = other.request_timeout_secs;
		}
		if other.graceful_shutdown_secs.is_some() {
			self.graceful_shutdown_secs = other.graceful_shutdown_secs;
		}
	}

	pub fn finalize(self) -> HttpConfig {
		HttpConfig {
			host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
			port: self.port.unwrap_or(DEFAULT_PORT),
			request_timeout_secs: self
				.request_timeout_secs
				.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
			graceful_shutdown_secs: self
				.graceful_shutdown_secs
				.unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS),
		}
	}
}
