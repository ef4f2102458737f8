// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// Severity of a one-shot message shown on the index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
	Success,
	Info,
	Warning,
	Danger,
}

impl AlertLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			AlertLevel::Success => "success",
			AlertLevel::Info => "info",
			AlertLevel::Warning => "warning",
			AlertLevel::Danger => "danger",
		}
	}

	/// Parse a level from a query string; anything unknown reads as `Info`.
	pub fn parse_lenient(s: &str) -> Self {
		match s {
			"success" => AlertLevel::Success,
			"warning" => AlertLevel::Warning,
			"danger" => AlertLevel::Danger,
			_ => AlertLevel::Info,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Alert {
	pub message: String,
	pub level: AlertLevel,
}

impl Alert {
	pub fn new(message: impl Into<String>, level: AlertLevel) -> Self {
		Self {
			message: message.into(),
			level,
		}
	}
}

/// Query parameters a redirect uses to hand an alert to the index page.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct AlertQuery {
	pub alert: Option<String>,
	pub level: Option<String>,
}

impl AlertQuery {
	pub fn into_alert(self) -> Option<Alert> {
		let message = self.alert.filter(|m| !m.is_empty())?;
		let level = self
			.level
			.as_deref()
			.map(AlertLevel::parse_lenient)
			.unwrap_or(AlertLevel::Info);
		Some(Alert::new(message, level))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_query_without_message_has_no_alert() {
		let query = AlertQuery {
			alert: None,
			level: Some("danger".to_string()),
		};
		assert!(query.into_alert().is_none());
	}

	#[test]
	fn test_unknown_level_defaults_to_info() {
		let query = AlertQuery {
			alert: Some("hello".to_string()),
			level: Some("purple".to_string()),
		};
		assert_eq!(query.into_alert(), Some(Alert::new("hello", AlertLevel::Info)));
	}

	#[test]
	fn test_level_serializes_lowercase() {
		let json = serde_json::to_string(&AlertLevel::Danger).unwrap();
		assert_eq!(json, "\"danger\"");
	}
}
