// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flag Producer: the console-side half of the protocol that allocates a
//! task id, persists the authoritative job row, and writes the flag file
//! a watcher or supervisor will later claim.

use crate::error::ConsoleError;
use chrono::Utc;
use flagline_core::{
    generate_task_id, summarize_params, validate_label, AuditEntry, FlagPayload, JobHandler, SupervisorHandler,
    TaskIdKind, ValidationError,
};
use flagline_fsops::{write_atomic, NasLayout};
use flagline_storage::StateStore;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// What got created by a successful `create_*_flag` call.
#[derive(Debug, Clone)]
pub struct FlagCreated {
    pub job_id: i64,
    pub task_id: String,
    pub flag_path: PathBuf,
}

pub struct FlagProducer {
    layout: NasLayout,
    store: Arc<dyn StateStore>,
}

impl FlagProducer {
    pub fn new(layout: NasLayout, store: Arc<dyn StateStore>) -> Self {
        Self { layout, store }
    }

    /// Validate, allocate, persist and write a control flag addressed to
    /// one watcher instance.
    ///
    /// The job row and audit entry are durable before the flag file is
    /// ever written. A write failure surfaces as an error with the job
    /// row left `queued` — spec leaves that row for a later operator
    /// retry or reap, not an automatic rollback.
    pub async fn create_supervisor_flag(
        &self,
        actor: &str,
        handler: &str,
        worker_id: &str,
        params: serde_json::Value,
        label: Option<&str>,
    ) -> Result<FlagCreated, ConsoleError> {
        if let Some(label) = label {
            validate_label(label)?;
        }
        if worker_id.is_empty() {
            return Err(ConsoleError::EmptyWorkerId);
        }
        SupervisorHandler::from_str(handler).map_err(|e| ValidationError::UnknownHandler(e.0))?;

        let task_id = generate_task_id(TaskIdKind::Task);
        let target_ref = format!("{handler}:{worker_id}");

        let job = self
            .store
            .insert_job(&task_id, "supervisor_control", &target_ref, label)
            .await?;
        self.store
            .insert_audit_entry(&AuditEntry::new(
                actor,
                "CREATE_FLAG",
                "job",
                &task_id,
                serde_json::json!({
                    "handler": handler,
                    "worker_id": worker_id,
                    "params_summary": summarize_params(&params),
                }),
                Utc::now(),
            ))
            .await?;

        let payload = FlagPayload {
            task_id: task_id.clone(),
            handler: handler.to_string(),
            target_ref: None,
            worker_id: Some(worker_id.to_string()),
            label: label.map(str::to_string),
            params,
            created_at: Utc::now(),
        };
        let flag_path = self.layout.worker_inbox().join(payload.expected_filename());
        let body = serde_json::to_vec_pretty(&payload).map_err(|source| ConsoleError::Serialize {
            what: "supervisor flag",
            source,
        })?;
        write_atomic(&flag_path, &body)?;

        Ok(FlagCreated {
            job_id: job.job_id,
            task_id,
            flag_path,
        })
    }

    /// Validate, allocate, persist and write a work flag for a job
    /// handler (currently just `acquire_source`).
    pub async fn create_job_flag(
        &self,
        actor: &str,
        handler: &str,
        params: serde_json::Value,
        label: Option<&str>,
    ) -> Result<FlagCreated, ConsoleError> {
        if let Some(label) = label {
            validate_label(label)?;
        }
        JobHandler::from_str(handler).map_err(|e| ValidationError::UnknownHandler(e.0))?;

        let task_id = generate_task_id(TaskIdKind::Job);
        let target_ref = summarize_params(&params);

        let job = self.store.insert_job(&task_id, handler, &target_ref, label).await?;
        self.store
            .insert_audit_entry(&AuditEntry::new(
                actor,
                "CREATE_FLAG",
                "job",
                &task_id,
                serde_json::json!({ "handler": handler, "params_summary": target_ref }),
                Utc::now(),
            ))
            .await?;

        let payload = FlagPayload {
            task_id: task_id.clone(),
            handler: handler.to_string(),
            target_ref: Some(target_ref),
            worker_id: None,
            label: label.map(str::to_string),
            params,
            created_at: Utc::now(),
        };
        let flag_path = self.layout.worker_inbox().join(payload.expected_filename());
        let body = serde_json::to_vec_pretty(&payload).map_err(|source| ConsoleError::Serialize {
            what: "job flag",
            source,
        })?;
        write_atomic(&flag_path, &body)?;

        Ok(FlagCreated {
            job_id: job.job_id,
            task_id,
            flag_path,
        })
    }
}

#[cfg(test)]
#[path = "producer_tests.rs"]
mod tests;
