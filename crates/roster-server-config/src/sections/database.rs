// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Roster database section: where people are stored and how many connections to hold.

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite:./roster.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
	/// SQLite URL of the people store.
	pub url: String,
	/// Upper bound on pooled connections. Sync `/add` requests and job inserts share it.
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			url: DEFAULT_DATABASE_URL.to_string(),
			max_connections: DEFAULT_MAX_CONNECTIONS,
		}
	}
}

impl DatabaseConfig {
	/// The store is SQLite only; any other scheme is a configuration mistake.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.url.starts_with("sqlite:") {
			return Err(ConfigError::Validation(format!(
				"database.url must be a sqlite: URL, got '{}'",
				self.url
			)));
		}

		if self.max_connections == 0 {
			return Err(ConfigError::Validation(
				"database.max_connections must be greater than zero".to_string(),
			));
		}

		Ok(())
	}
}

/// Database configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DatabaseConfigLayer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub max_connections: Option<u32>,
}

impl DatabaseConfigLayer {
	pub fn merge(&mut self, other: DatabaseConfigLayer) {
		if other.url.is_some() {
			self.url = other.url;
		}
		if other.max_connections.is_some() {
			self.max_connections = other.max_connections;
		}
	}

	pub fn finalize(self) -> DatabaseConfig {
		DatabaseConfig {
			url: self.url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
			max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
		}
	}
}
