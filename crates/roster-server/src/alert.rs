// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redirect targets. Alerts travel to the index page in the query string.

use axum::response::Redirect;
use roster_server_api::{Alert, AlertLevel};

pub fn home_uri(alert: Option<&Alert>) -> String {
	match alert {
		Some(alert) => format!(
			"/?alert={}&level={}",
			urlencoding::encode(&alert.message),
			alert.level.as_str()
		),
		None => "/".to_string(),
	}
}

pub fn status_uri(name: &str) -> String {
	format!("/status/{}", urlencoding::encode(name))
}

/// `303 See Other` to the index page, carrying `alert` if given.
pub fn redirect_home(alert: Option<Alert>) -> Redirect {
	Redirect::to(&home_uri(alert.as_ref()))
}

pub fn redirect_home_with(message: impl Into<String>, level: AlertLevel) -> Redirect {
	redirect_home(Some(Alert::new(message, level)))
}

/// `303 See Other` to the status view of the job for `name`.
pub fn redirect_to_status(name: &str) -> Redirect {
	Redirect::to(&status_uri(name))
}
