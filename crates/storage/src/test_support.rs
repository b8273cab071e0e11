// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory [`StateStore`] double, available to other crates under
//! the `test-support` feature so their tests don't need a live Postgres.

use crate::error::StorageError;
use crate::state_store::StateStore;
use async_trait::async_trait;
use chrono::Utc;
use flagline_core::{AuditEntry, JobRecord, JobState, WorkerRow};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct Inner {
    jobs: Vec<JobRecord>,
    next_job_id: i64,
    workers: HashMap<String, WorkerRow>,
    audit: Vec<AuditEntry>,
}

/// A `HashMap`-backed double, good enough to exercise the watcher,
/// supervisor and console logic that depends on [`StateStore`] without
/// touching a database.
pub struct InMemoryStateStore {
    inner: Mutex<Inner>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_job_id: 1,
                ..Default::default()
            }),
        }
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.inner.lock().audit.clone()
    }

    pub fn worker(&self, worker_id: &str) -> Option<WorkerRow> {
        self.inner.lock().workers.get(worker_id).cloned()
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn insert_job(
        &self,
        task_id: &str,
        job_type: &str,
        target_ref: &str,
        label: Option<&str>,
    ) -> Result<JobRecord, StorageError> {
        let mut inner = self.inner.lock();
        let job_id = inner.next_job_id;
        inner.next_job_id += 1;
        let job = JobRecord {
            job_id,
            task_id: task_id.to_string(),
            job_type: job_type.to_string(),
            target_ref: target_ref.to_string(),
            label: label.map(str::to_string),
            state: JobState::Queued,
            created_at: Utc::now(),
            finished_at: None,
            result_path: None,
            last_error: None,
        };
        inner.jobs.push(job.clone());
        Ok(job)
    }

    async fn fetch_one_job_by_task_id(&self, task_id: &str) -> Result<Option<JobRecord>, StorageError> {
        Ok(self
            .inner
            .lock()
            .jobs
            .iter()
            .find(|j| j.task_id == task_id)
            .cloned())
    }

    async fn fetch_all_jobs_by_state(&self, state: JobState) -> Result<Vec<JobRecord>, StorageError> {
        Ok(self
            .inner
            .lock()
            .jobs
            .iter()
            .filter(|j| j.state == state)
            .cloned()
            .collect())
    }

    async fn mark_job_running(&self, job_id: i64) -> Result<(), StorageError> {
        let mut inner = self.inner.lock();
        if let Some(job) = inner.jobs.iter_mut().find(|j| j.job_id == job_id) {
            if job.state.can_transition_to(JobState::Running) {
                job.state = JobState::Running;
            }
        }
        Ok(())
    }

    async fn mark_job_finished(
        &self,
        job_id: i64,
        state: JobState,
        result_path: Option<&str>,
        last_error: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.lock();
        if let Some(job) = inner.jobs.iter_mut().find(|j| j.job_id == job_id) {
            if job.state.can_transition_to(state) {
                job.state = state;
                job.finished_at = Some(Utc::now());
                job.result_path = result_path.map(str::to_string);
                job.last_error = last_error.map(str::to_string);
            }
        }
        Ok(())
    }

    async fn find_supervisor_job_id(&self, worker_id: &str) -> Result<Option<i64>, StorageError> {
        let inner = self.inner.lock();
        Ok(inner
            .jobs
            .iter()
            .filter(|j| {
                j.job_type == "supervisor_control"
                    && j.target_ref == worker_id
                    && !j.state.is_terminal()
            })
            .max_by_key(|j| j.created_at)
            .map(|j| j.job_id))
    }

    async fn upsert_worker_heartbeat(
        &self,
        worker_id: &str,
        status_summary: &str,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.lock();
        inner.workers.insert(
            worker_id.to_string(),
            WorkerRow {
                worker_id: worker_id.to_string(),
                last_heartbeat_at: Utc::now(),
                status_summary: status_summary.to_string(),
            },
        );
        Ok(())
    }

    async fn insert_audit_entry(&self, entry: &AuditEntry) -> Result<(), StorageError> {
        self.inner.lock().audit.push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
