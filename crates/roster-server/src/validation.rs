// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validation for names submitted through the forms.

use crate::error::ServerError;

pub const MAX_NAME_CHARS: usize = 128;

/// Trim `raw` and check it is usable as a person's name and job key.
///
/// Names must be non-empty after trimming, at most [`MAX_NAME_CHARS`]
/// characters, and free of control characters.
pub fn validate_name(raw: &str) -> Result<String, ServerError> {
	let name = raw.trim();
	if name.is_empty() {
		return Err(ServerError::BadRequest("name must not be empty".to_string()));
	}
	if name.chars().count() > MAX_NAME_CHARS {
		return Err(ServerError::BadRequest(format!(
			"name must be at most {MAX_NAME_CHARS} characters"
		)));
	}
	if name.chars().any(char::is_control) {
		return Err(ServerError::BadRequest(
			"name must not contain control characters".to_string(),
		));
	}
	Ok(name.to_string())
}
