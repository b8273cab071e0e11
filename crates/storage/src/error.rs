// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to establish connection pool: {0}")]
    Pool(#[source] sqlx::Error),

    #[error("query failed after {attempts} attempt(s): {source}")]
    Query {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{target_type} {target_id:?} was not found")]
    NotFound {
        target_type: &'static str,
        target_id: String,
    },

    #[error("job state transition {from} -> {to} is not legal for job {job_id}")]
    IllegalTransition {
        job_id: i64,
        from: String,
        to: String,
    },
}
