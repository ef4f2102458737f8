// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{DbError, Result};

/// A person recorded by the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
	pub uid: String,
	pub name: String,
	pub created_at: DateTime<Utc>,
	pub traits: Option<serde_json::Value>,
}

impl Person {
	/// Build a new record with a fresh UUID and the current timestamp.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			uid: uuid::Uuid::new_v4().to_string(),
			name: name.into(),
			created_at: Utc::now(),
			traits: None,
		}
	}
}

type PersonRow = (String, String, String, Option<String>);

fn row_to_person((uid, name, created_at, traits): PersonRow) -> Result<Person> {
	let created_at = DateTime::parse_from_rfc3339(&created_at)
		.map_err(|e| DbError::Internal(format!("invalid created_at for {uid}: {e}")))?
		.with_timezone(&Utc);
	let traits = traits.map(|t| serde_json::from_str(&t)).transpose()?;

	Ok(Person {
		uid,
		name,
		created_at,
		traits,
	})
}

#[derive(Clone)]
pub struct PersonRepository {
	pool: SqlitePool,
}

impl PersonRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new person.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if a person with the same name already exists.
	#[tracing::instrument(skip(self, person), fields(uid = %person.uid, name = %person.name))]
	pub async fn create(&self, person: &Person) -> Result<()> {
		let traits = person
			.traits
			.as_ref()
			.map(serde_json::to_string)
			.transpose()?;

		let result = sqlx::query(
			r#"
			INSERT INTO people (uid, name, created_at, traits)
			VALUES (?, ?, ?, ?)
			"#,
		)
		.bind(&person.uid)
		.bind(&person.name)
		.bind(person.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true))
		.bind(traits)
		.execute(&self.pool)
		.await;

		match result {
			Ok(_) => {
				tracing::debug!("person created");
				Ok(())
			}
			Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::Conflict(
				format!("person '{}' already exists", person.name),
			)),
			Err(e) => Err(e.into()),
		}
	}

	#[tracing::instrument(skip(self))]
	pub async fn find_by_name(&self, name: &str) -> Result<Option<Person>> {
		let row = sqlx::query_as::<_, PersonRow>(
			"SELECT uid, name, created_at, traits FROM people WHERE name = ?",
		)
		.bind(name)
		.fetch_optional(&self.pool)
		.await?;

		row.map(row_to_person).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Person>> {
		let rows = sqlx::query_as::<_, PersonRow>(
			"SELECT uid, name, created_at, traits FROM people ORDER BY created_at, name",
		)
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(row_to_person).collect()
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM people")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}
}
