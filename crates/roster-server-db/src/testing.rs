// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Single-connection in-memory pool; every extra connection would see its own empty database.
pub async fn create_test_pool() -> SqlitePool {
	SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect("sqlite::memory:")
		.await
		.unwrap()
}

pub async fn create_people_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	crate::migrations::run_migrations(&pool).await.unwrap();
	pool
}
