// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::StorageError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Build a bounded connection pool. `pool_size` defaults to 5 and
/// `query_timeout` bounds both acquiring a connection and each
/// individual query issued against it.
pub async fn build_pool(
    database_url: &str,
    pool_size: u32,
    query_timeout: Duration,
) -> Result<PgPool, StorageError> {
    PgPoolOptions::new()
        .max_connections(pool_size)
        .acquire_timeout(query_timeout)
        .connect(database_url)
        .await
        .map_err(StorageError::Pool)
}

/// Run embedded migrations against `pool`. Safe to call on every startup
/// — migrations are idempotent (`CREATE TABLE IF NOT EXISTS`) and sqlx
/// tracks which have already applied.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
