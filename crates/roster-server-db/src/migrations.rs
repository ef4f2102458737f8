// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::SqlitePool;

use crate::error::Result;

const MIGRATIONS: &[(&str, &str)] = &[
	(
		"001_create_people",
		r#"
		CREATE TABLE IF NOT EXISTS people (
			uid TEXT PRIMARY KEY NOT NULL,
			name TEXT NOT NULL UNIQUE,
			created_at TEXT NOT NULL,
			traits TEXT
		)
		"#,
	),
	(
		"002_index_people_created_at",
		"CREATE INDEX IF NOT EXISTS idx_people_created_at ON people(created_at)",
	),
];

/// Apply the schema. Every statement is idempotent, so this runs on each startup.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
	for (name, sql) in MIGRATIONS {
		sqlx::query(sql).execute(pool).await?;
		tracing::debug!(migration = name, "migration applied");
	}

	tracing::info!(count = MIGRATIONS.len(), "database migrations complete");
	Ok(())
}
