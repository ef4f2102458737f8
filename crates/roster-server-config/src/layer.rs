// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Deserialize;

use crate::sections::{DatabaseConfigLayer, HttpConfigLayer, JobsConfigLayer, LoggingConfigLayer};

/// A partial configuration as produced by one source.
///
/// Sections that a source does not mention stay `None` so that merging only
/// overrides what was actually provided.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub jobs: Option<JobsConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	let Some(incoming) = other else {
		return;
	};
	if let Some(existing) = base.as_mut() {
		merge(existing, incoming);
	} else {
		*base = Some(incoming);
	}
}

impl ServerConfigLayer {
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.jobs, other.jobs, JobsConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}
