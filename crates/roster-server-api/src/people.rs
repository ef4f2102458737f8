// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_server_db::Person;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::alerts::Alert;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PersonResponse {
	pub uid: String,
	pub name: String,
	pub created_at: String,
	pub traits: Option<serde_json::Value>,
}

impl From<Person> for PersonResponse {
	fn from(person: Person) -> Self {
		Self {
			uid: person.uid,
			name: person.name,
			created_at: person.created_at.to_rfc3339(),
			traits: person.traits,
		}
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct IndexResponse {
	pub alert: Option<Alert>,
	pub people: Vec<PersonResponse>,
	pub count: usize,
}

/// Form body shared by `/add`, `/background` and `/status`.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NameForm {
	pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}
