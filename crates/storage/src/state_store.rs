// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The State Store Adapter: the only component that talks SQL. Every
//! other crate reaches the database through the [`StateStore`] trait.

use crate::error::StorageError;
use crate::retry::{with_retry, RetryPolicy};
use async_trait::async_trait;
use chrono::Utc;
use flagline_core::{AuditEntry, JobRecord, JobState};
use sqlx::{PgPool, Row};
use std::str::FromStr;

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn insert_job(
        &self,
        task_id: &str,
        job_type: &str,
        target_ref: &str,
        label: Option<&str>,
    ) -> Result<JobRecord, StorageError>;

    async fn fetch_one_job_by_task_id(&self, task_id: &str) -> Result<Option<JobRecord>, StorageError>;

    async fn fetch_all_jobs_by_state(&self, state: JobState) -> Result<Vec<JobRecord>, StorageError>;

    async fn mark_job_running(&self, job_id: i64) -> Result<(), StorageError>;

    async fn mark_job_finished(
        &self,
        job_id: i64,
        state: JobState,
        result_path: Option<&str>,
        last_error: Option<&str>,
    ) -> Result<(), StorageError>;

    /// The most recent in-flight `supervisor_control` job targeting
    /// `worker_id`, used to map a supervisor result back to its job row
    /// when the result payload carries no job id of its own.
    async fn find_supervisor_job_id(&self, worker_id: &str) -> Result<Option<i64>, StorageError>;

    async fn upsert_worker_heartbeat(
        &self,
        worker_id: &str,
        status_summary: &str,
    ) -> Result<(), StorageError>;

    async fn insert_audit_entry(&self, entry: &AuditEntry) -> Result<(), StorageError>;
}

pub struct PgStateStore {
    pool: PgPool,
    retry_policy: RetryPolicy,
}

impl PgStateStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            retry_policy: RetryPolicy::default_policy(),
        }
    }

    pub fn with_retry_policy(pool: PgPool, retry_policy: RetryPolicy) -> Self {
        Self { pool, retry_policy }
    }

    fn row_to_job(row: &sqlx::postgres::PgRow) -> Result<JobRecord, StorageError> {
        let state_str: String = row.try_get("state").map_err(|source| StorageError::Query {
            attempts: 1,
            source,
        })?;
        let state = JobState::from_str(&state_str).map_err(|_| StorageError::NotFound {
            target_type: "job_state",
            target_id: state_str.clone(),
        })?;
        Ok(JobRecord {
            job_id: row.try_get("job_id").unwrap_or_default(),
            task_id: row.try_get("task_id").unwrap_or_default(),
            job_type: row.try_get("job_type").unwrap_or_default(),
            target_ref: row.try_get("target_ref").unwrap_or_default(),
            label: row.try_get("label").ok(),
            state,
            created_at: row.try_get("created_at").unwrap_or_else(|_| Utc::now()),
            finished_at: row.try_get("finished_at").ok(),
            result_path: row.try_get("result_path").ok(),
            last_error: row.try_get("last_error").ok(),
        })
    }
}

#[async_trait]
impl StateStore for PgStateStore {
    async fn insert_job(
        &self,
        task_id: &str,
        job_type: &str,
        target_ref: &str,
        label: Option<&str>,
    ) -> Result<JobRecord, StorageError> {
        let row = with_retry(self.retry_policy, || {
            sqlx::query(
                "INSERT INTO jobs_t (task_id, job_type, target_ref, label, state) \
                 VALUES ($1, $2, $3, $4, 'queued') \
                 RETURNING job_id, task_id, job_type, target_ref, label, state, created_at, finished_at, result_path, last_error",
            )
            .bind(task_id)
            .bind(job_type)
            .bind(target_ref)
            .bind(label)
            .fetch_one(&self.pool)
        })
        .await?;
        Self::row_to_job(&row)
    }

    async fn fetch_one_job_by_task_id(&self, task_id: &str) -> Result<Option<JobRecord>, StorageError> {
        let row = with_retry(self.retry_policy, || {
            sqlx::query(
                "SELECT job_id, task_id, job_type, target_ref, label, state, created_at, finished_at, result_path, last_error \
                 FROM jobs_t WHERE task_id = $1",
            )
            .bind(task_id)
            .fetch_optional(&self.pool)
        })
        .await?;
        row.map(|r| Self::row_to_job(&r)).transpose()
    }

    async fn fetch_all_jobs_by_state(&self, state: JobState) -> Result<Vec<JobRecord>, StorageError> {
        let rows = with_retry(self.retry_policy, || {
            sqlx::query(
                "SELECT job_id, task_id, job_type, target_ref, label, state, created_at, finished_at, result_path, last_error \
                 FROM jobs_t WHERE state = $1 ORDER BY created_at ASC",
            )
            .bind(state.as_str())
            .fetch_all(&self.pool)
        })
        .await?;
        rows.iter().map(Self::row_to_job).collect()
    }

    async fn mark_job_running(&self, job_id: i64) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::Pool)?;
        sqlx::query("UPDATE jobs_t SET state = 'running' WHERE job_id = $1 AND state = 'queued'")
            .bind(job_id)
            .execute(&mut *tx)
            .await
            .map_err(|source| StorageError::Query { attempts: 1, source })?;
        tx.commit().await.map_err(StorageError::Pool)?;
        Ok(())
    }

    async fn mark_job_finished(
        &self,
        job_id: i64,
        state: JobState,
        result_path: Option<&str>,
        last_error: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::Pool)?;
        sqlx::query(
            "UPDATE jobs_t SET state = $1, finished_at = $2, result_path = $3, last_error = $4 \
             WHERE job_id = $5 AND state = 'running'",
        )
        .bind(state.as_str())
        .bind(Utc::now())
        .bind(result_path)
        .bind(last_error)
        .bind(job_id)
        .execute(&mut *tx)
        .await
        .map_err(|source| StorageError::Query { attempts: 1, source })?;
        tx.commit().await.map_err(StorageError::Pool)?;
        Ok(())
    }

    async fn find_supervisor_job_id(&self, worker_id: &str) -> Result<Option<i64>, StorageError> {
        let row = with_retry(self.retry_policy, || {
            sqlx::query(
                "SELECT job_id FROM jobs_t \
                 WHERE job_type = 'supervisor_control' AND target_ref = $1 \
                   AND state IN ('queued', 'running') \
                 ORDER BY created_at DESC LIMIT 1",
            )
            .bind(worker_id)
            .fetch_optional(&self.pool)
        })
        .await?;
        Ok(row.and_then(|r| r.try_get::<i64, _>("job_id").ok()))
    }

    async fn upsert_worker_heartbeat(
        &self,
        worker_id: &str,
        status_summary: &str,
    ) -> Result<(), StorageError> {
        with_retry(self.retry_policy, || {
            sqlx::query(
                "INSERT INTO workers_t (worker_id, last_heartbeat_at, status_summary) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (worker_id) DO UPDATE \
                 SET last_heartbeat_at = EXCLUDED.last_heartbeat_at, status_summary = EXCLUDED.status_summary",
            )
            .bind(worker_id)
            .bind(Utc::now())
            .bind(status_summary)
            .execute(&self.pool)
        })
        .await?;
        Ok(())
    }

    async fn insert_audit_entry(&self, entry: &AuditEntry) -> Result<(), StorageError> {
        with_retry(self.retry_policy, || {
            sqlx::query(
                "INSERT INTO audit_log_t (actor, action, target_type, target_id, details_json, ts) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&entry.actor)
            .bind(&entry.action)
            .bind(&entry.target_type)
            .bind(&entry.target_id)
            .bind(&entry.details_json)
            .bind(entry.ts)
            .execute(&self.pool)
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_store_tests.rs"]
mod tests;
