// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result Consumer: polls the console's inbox (the watcher's/supervisor's
//! `results/` directory), correlates each result back to a `jobs_t` row,
//! and advances it to a terminal state.

use crate::error::ConsoleError;
use chrono::Utc;
use flagline_core::{AuditEntry, JobState, ResultKind, ResultPayload};
use flagline_fsops::NasLayout;
use flagline_storage::StateStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What to do with a result file once it's been processed.
#[derive(Debug, Clone)]
pub enum CleanupPolicy {
    Delete,
    /// Move processed files into this directory, creating it lazily on
    /// first use.
    Archive(PathBuf),
}

/// What happened to one result file.
#[derive(Debug, Clone)]
pub enum ResultOutcome {
    Job {
        task_id: String,
        job_id: i64,
        success: bool,
    },
    Supervisor {
        supervisor_id: String,
        worker_id: String,
        actions_applied: usize,
    },
    /// Neither shape matched, or the job/action had no corresponding row.
    Ignored { reason: String },
}

#[derive(Debug, Clone)]
pub struct ProcessedResult {
    pub file: PathBuf,
    pub outcome: ResultOutcome,
}

pub struct ResultConsumer {
    layout: NasLayout,
    store: Arc<dyn StateStore>,
    cleanup: CleanupPolicy,
}

const SYSTEM_ACTOR: &str = "console";

impl ResultConsumer {
    pub fn new(layout: NasLayout, store: Arc<dyn StateStore>, cleanup: CleanupPolicy) -> Self {
        Self { layout, store, cleanup }
    }

    /// Enumerate `*.json` in the inbox in sorted order and dispatch each
    /// to the job-result or supervisor-result path. A single malformed or
    /// uncorrelated file never aborts the batch — it's logged and moved
    /// on from.
    pub async fn process_pending_results(&self) -> Result<Vec<ProcessedResult>, ConsoleError> {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(self.layout.results())
            .map_err(|source| flagline_fsops::FsError::io(self.layout.results(), source))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        entries.sort();

        let mut processed = Vec::with_capacity(entries.len());
        for path in entries {
            let outcome = self.process_one(&path).await?;
            self.apply_cleanup(&path)?;
            processed.push(ProcessedResult { file: path, outcome });
        }
        Ok(processed)
    }

    async fn process_one(&self, path: &Path) -> Result<ResultOutcome, ConsoleError> {
        let raw = std::fs::read_to_string(path).map_err(|source| flagline_fsops::FsError::io(path.to_path_buf(), source))?;
        let payload: ResultPayload = match serde_json::from_str(&raw) {
            Ok(payload) => payload,
            Err(source) => {
                tracing::warn!(file = %path.display(), error = %source, "result file failed to parse, skipping");
                return Ok(ResultOutcome::Ignored {
                    reason: format!("parse error: {source}"),
                });
            }
        };

        match payload.kind() {
            Some(ResultKind::Job { task_id }) => self.apply_job_result(path, &task_id, &payload).await,
            Some(ResultKind::Supervisor { supervisor_id, worker_id }) => {
                self.apply_supervisor_result(path, &supervisor_id, &worker_id, &payload).await
            }
            None => {
                tracing::warn!(file = %path.display(), "result payload matches neither job nor supervisor shape");
                Ok(ResultOutcome::Ignored {
                    reason: "neither task_id nor (supervisor_id, worker_id) present".to_string(),
                })
            }
        }
    }

    async fn apply_job_result(
        &self,
        path: &Path,
        task_id: &str,
        payload: &ResultPayload,
    ) -> Result<ResultOutcome, ConsoleError> {
        let Some(job) = self.store.fetch_one_job_by_task_id(task_id).await? else {
            tracing::warn!(task_id, "result names a task_id with no matching job row");
            return Ok(ResultOutcome::Ignored {
                reason: format!("no job row for task_id {task_id}"),
            });
        };

        // A queued job that never saw `mark_job_running` (the watcher
        // doesn't call it) is promoted here so the succeeded/failed
        // transition below is legal.
        self.store.mark_job_running(job.job_id).await?;

        let state = if payload.success { JobState::Succeeded } else { JobState::Failed };
        let error = payload.extract_error();
        self.store
            .mark_job_finished(job.job_id, state, Some(&path.display().to_string()), error.as_deref())
            .await?;

        self.store
            .insert_audit_entry(&AuditEntry::new(
                SYSTEM_ACTOR,
                "JOB_COMPLETED",
                "job",
                task_id,
                serde_json::json!({ "success": payload.success, "error": error }),
                Utc::now(),
            ))
            .await?;
        self.store
            .insert_audit_entry(&AuditEntry::new(
                SYSTEM_ACTOR,
                "PROCESS_RESULT",
                "result_file",
                path.display().to_string(),
                serde_json::json!({ "task_id": task_id }),
                Utc::now(),
            ))
            .await?;

        Ok(ResultOutcome::Job {
            task_id: task_id.to_string(),
            job_id: job.job_id,
            success: payload.success,
        })
    }

    async fn apply_supervisor_result(
        &self,
        path: &Path,
        supervisor_id: &str,
        worker_id: &str,
        payload: &ResultPayload,
    ) -> Result<ResultOutcome, ConsoleError> {
        let actions = payload.actions.clone().unwrap_or_default();
        let mut applied = 0usize;

        for action in &actions {
            let handler = ResultPayload::handler_from_action(action);
            let target_ref = format!("{handler}:{worker_id}");
            let Some(job_id) = self.store.find_supervisor_job_id(&target_ref).await? else {
                tracing::warn!(action, worker_id, "no in-flight supervisor_control job for this action");
                continue;
            };

            self.store.mark_job_running(job_id).await?;
            let state = if payload.success { JobState::Succeeded } else { JobState::Failed };
            let error = payload.extract_error();
            self.store
                .mark_job_finished(job_id, state, Some(&path.display().to_string()), error.as_deref())
                .await?;
            self.store
                .insert_audit_entry(&AuditEntry::new(
                    SYSTEM_ACTOR,
                    "SUPERVISOR_ACTION_COMPLETED",
                    "job",
                    job_id.to_string(),
                    serde_json::json!({ "action": action, "worker_id": worker_id }),
                    Utc::now(),
                ))
                .await?;
            applied += 1;
        }

        self.store
            .insert_audit_entry(&AuditEntry::new(
                SYSTEM_ACTOR,
                "PROCESS_RESULT",
                "result_file",
                path.display().to_string(),
                serde_json::json!({ "supervisor_id": supervisor_id, "worker_id": worker_id, "actions": actions }),
                Utc::now(),
            ))
            .await?;

        Ok(ResultOutcome::Supervisor {
            supervisor_id: supervisor_id.to_string(),
            worker_id: worker_id.to_string(),
            actions_applied: applied,
        })
    }

    fn apply_cleanup(&self, path: &Path) -> Result<(), ConsoleError> {
        match &self.cleanup {
            CleanupPolicy::Delete => {
                std::fs::remove_file(path).map_err(|source| flagline_fsops::FsError::io(path.to_path_buf(), source))?;
            }
            CleanupPolicy::Archive(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| flagline_fsops::FsError::io(dir.clone(), source))?;
                let Some(name) = path.file_name() else { return Ok(()) };
                std::fs::rename(path, dir.join(name)).map_err(|source| flagline_fsops::FsError::io(path.to_path_buf(), source))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "consumer_tests.rs"]
mod tests;
