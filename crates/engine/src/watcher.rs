// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Watcher Core: claims flags from `Worker_Inbox/`, dispatches them
//! to job handlers, and writes results back. Owns the single-instance
//! lock for its `worker_id` for as long as it runs.

use crate::context::JobContext;
use crate::error::EngineError;
use crate::gate::IntervalGate;
use crate::registry::JobHandlerRegistry;
use chrono::Utc;
use flagline_core::{FlagPayload, ResultPayload};
use flagline_fsops::{claim_rename, write_atomic, InstanceLock, NasLayout, OwnerInfo};
use flagline_storage::StateStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct Watcher {
    layout: NasLayout,
    worker_id: String,
    handlers: JobHandlerRegistry,
    store: Arc<dyn StateStore>,
    scan_gate: IntervalGate,
    heartbeat_gate: IntervalGate,
    dry_run: bool,
    shutdown: Arc<AtomicBool>,
}

/// Outcome of processing one claimed flag, surfaced from
/// [`Watcher::process_pending`] for logging and tests.
#[derive(Debug, Clone)]
pub struct ProcessedTask {
    pub task_id: String,
    pub handler: String,
    pub success: bool,
}

impl Watcher {
    pub fn new(
        layout: NasLayout,
        worker_id: impl Into<String>,
        handlers: JobHandlerRegistry,
        store: Arc<dyn StateStore>,
        scan_interval: Duration,
        heartbeat_interval: Duration,
        dry_run: bool,
    ) -> Self {
        Self {
            layout,
            worker_id: worker_id.into(),
            handlers,
            store,
            scan_gate: IntervalGate::new(scan_interval),
            heartbeat_gate: IntervalGate::new(heartbeat_interval),
            dry_run,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A clone of the shutdown flag, for wiring into a signal handler.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Acquire this watcher's single-instance lock, run the event loop —
    /// one tick per second, scan and heartbeat gated independently, an
    /// unconditional heartbeat before the first tick — until shutdown is
    /// requested, then release the lock.
    pub async fn run(&mut self) -> Result<(), EngineError> {
        let lock_dir = self.layout.lock_dir_for(&self.worker_id);
        let mut lock = InstanceLock::acquire(lock_dir, OwnerInfo::current(&self.worker_id))?;

        self.send_heartbeat().await?;
        self.heartbeat_gate.mark_fired(Instant::now());

        while !self.shutdown.load(Ordering::SeqCst) {
            self.tick().await?;
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        lock.release()?;
        Ok(())
    }

    /// One iteration of the loop body: fire whichever gates are due.
    /// Exposed separately from [`Watcher::run`] so tests can drive ticks
    /// without sleeping in real time.
    pub async fn tick(&mut self) -> Result<Vec<ProcessedTask>, EngineError> {
        let now = Instant::now();
        let mut processed = Vec::new();

        if self.scan_gate.is_due(now) {
            processed = self.process_pending().await?;
            self.scan_gate.mark_fired(now);
        }
        if self.heartbeat_gate.is_due(now) {
            self.send_heartbeat().await?;
            self.heartbeat_gate.mark_fired(now);
        }
        Ok(processed)
    }

    /// Scan, claim, execute and publish results for every pending flag.
    pub async fn process_pending(&self) -> Result<Vec<ProcessedTask>, EngineError> {
        let mut results = Vec::new();
        for flag_path in self.scan_pending()? {
            let Some(claimed_path) = self.claim(&flag_path)? else {
                continue;
            };
            let processed = self.process_one(&claimed_path).await?;
            results.push(processed);
        }
        Ok(results)
    }

    fn scan_pending(&self) -> Result<Vec<PathBuf>, EngineError> {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(self.layout.worker_inbox())
            .map_err(|source| flagline_fsops::FsError::io(self.layout.worker_inbox(), source))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("flag"))
            .collect();
        entries.sort();
        Ok(entries)
    }

    /// Claim a single flag, tolerating the case where another watcher
    /// instance (or a prior crashed run) got there first.
    fn claim(&self, flag_path: &Path) -> Result<Option<PathBuf>, EngineError> {
        let Some(file_name) = flag_path.file_name() else {
            return Ok(None);
        };
        let dest = self.layout.processing().join(file_name);
        match claim_rename(flag_path, &dest) {
            Ok(()) => Ok(Some(dest)),
            Err(flagline_fsops::FsError::AlreadyClaimed { .. }) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    async fn process_one(&self, claimed_path: &Path) -> Result<ProcessedTask, EngineError> {
        let raw = std::fs::read_to_string(claimed_path)
            .map_err(|source| flagline_fsops::FsError::io(claimed_path.to_path_buf(), source))?;
        let payload: FlagPayload = serde_json::from_str(&raw).map_err(|source| EngineError::MalformedFlag {
            path: claimed_path.to_path_buf(),
            reason: source.to_string(),
        })?;

        let outcome = match self.handlers.get(&payload.handler) {
            Some(handler) => {
                let ctx = JobContext {
                    task_id: payload.task_id.clone(),
                    target_ref: payload.target_ref.clone().unwrap_or_default(),
                    label: payload.label.clone(),
                    params: payload.params.clone(),
                    dry_run: self.dry_run,
                };
                handler.run(&ctx).await
            }
            None => crate::outcome::HandlerOutcome::failed(format!(
                "no job handler registered for {:?}",
                payload.handler
            )),
        };

        self.record_result(&payload, &outcome)?;
        let _ = std::fs::remove_file(claimed_path);

        Ok(ProcessedTask {
            task_id: payload.task_id,
            handler: payload.handler,
            success: outcome.success,
        })
    }

    fn record_result(
        &self,
        payload: &FlagPayload,
        outcome: &crate::outcome::HandlerOutcome,
    ) -> Result<(), EngineError> {
        let result = ResultPayload {
            task_id: Some(payload.task_id.clone()),
            supervisor_id: None,
            worker_id: None,
            success: outcome.success,
            error: outcome.error.clone(),
            result: Some(outcome.detail.clone()),
            actions: None,
            completed_at: Utc::now(),
        };
        let suffix = if outcome.success { "result" } else { "error" };
        let path = self
            .layout
            .results()
            .join(format!("{}.{suffix}.json", payload.task_id));
        let body = serde_json::to_vec_pretty(&result).map_err(|source| EngineError::Serialize {
            what: "job result",
            source,
        })?;
        write_atomic(&path, &body)?;
        Ok(())
    }

    pub async fn send_heartbeat(&self) -> Result<(), EngineError> {
        let status = if self.dry_run { "dry_run" } else { "running" };
        let heartbeat_path = self.layout.heartbeat_file_for(&self.worker_id);
        let body = serde_json::json!({
            "worker_id": self.worker_id,
            "status": status,
            "at": Utc::now(),
        });
        let body = serde_json::to_vec_pretty(&body).map_err(|source| EngineError::Serialize {
            what: "heartbeat",
            source,
        })?;
        write_atomic(&heartbeat_path, &body)?;
        self.store.upsert_worker_heartbeat(&self.worker_id, status).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
