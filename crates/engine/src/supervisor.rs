// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Supervisor Core: a single health-check-and-dispatch pass over the
//! control flags addressed to one watcher instance.
//!
//! Unlike the watcher, the supervisor is not a long-running loop — it is
//! invoked once per cron tick (or once per CLI invocation), checks whether
//! its watcher is alive, optionally restarts it, dispatches every pending
//! control flag in priority order, and publishes one combined result for
//! the whole pass (not one per flag — the console correlates a pass's
//! `actions` list back to individual `supervisor_control` job rows).

use crate::context::SupervisorContext;
use crate::error::EngineError;
use crate::registry::SupervisorHandlerRegistry;
use chrono::Utc;
use flagline_adapters::subprocess::{run_with_timeout, CODE_OPERATION_TIMEOUT};
use flagline_adapters::ProcessControl;
use flagline_core::{generate_task_id_at, FlagPayload, ResultPayload, SupervisorHandler, TaskIdKind};
use flagline_fsops::{claim_rename, write_atomic, InstanceLock, NasLayout};
use flagline_storage::StateStore;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::process::Command;

/// Whether the watched process is alive, and if so, its pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherHealth {
    Alive(u32),
    Dead,
    /// No owner record exists yet — the watcher has never acquired its
    /// lock, which is not itself an error (first run, or decommissioned).
    NeverStarted,
}

impl WatcherHealth {
    fn as_label(self) -> &'static str {
        match self {
            WatcherHealth::Alive(_) => "alive",
            WatcherHealth::Dead => "dead",
            WatcherHealth::NeverStarted => "never_started",
        }
    }
}

/// What one [`Supervisor::run_once`] pass did, for logging and exit codes.
#[derive(Debug, Clone)]
pub struct SupervisorRunSummary {
    pub health: WatcherHealth,
    pub restarted: bool,
    pub dispatched: Vec<DispatchedControl>,
    /// Whether every dispatched control succeeded. `true` (vacuously) when
    /// nothing was dispatched this pass.
    pub success: bool,
}

#[derive(Debug, Clone)]
pub struct DispatchedControl {
    pub task_id: String,
    pub handler: String,
    pub label: Option<String>,
    pub success: bool,
    pub error: Option<String>,
}

pub struct Supervisor {
    layout: NasLayout,
    worker_id: String,
    handlers: SupervisorHandlerRegistry,
    store: Arc<dyn StateStore>,
    process_control: Arc<dyn ProcessControl>,
    auto_restart: bool,
    restart_command: Option<String>,
    dry_run: bool,
}

impl Supervisor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        layout: NasLayout,
        worker_id: impl Into<String>,
        handlers: SupervisorHandlerRegistry,
        store: Arc<dyn StateStore>,
        process_control: Arc<dyn ProcessControl>,
        auto_restart: bool,
        restart_command: Option<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            layout,
            worker_id: worker_id.into(),
            handlers,
            store,
            process_control,
            auto_restart,
            restart_command,
            dry_run,
        }
    }

    /// One supervisor pass: health check, conditional restart, then
    /// priority-ordered dispatch of every control flag addressed to this
    /// worker id, published as a single combined result.
    pub async fn run_once(&self) -> Result<SupervisorRunSummary, EngineError> {
        let health = self.check_watcher_health()?;
        let mut restarted = false;
        if health == WatcherHealth::Dead && self.auto_restart {
            restarted = self.restart_watcher().await?;
        }

        let dispatched = self.dispatch_pending().await?;
        let success = dispatched.iter().all(|d| d.success);
        self.publish_pass_result(&dispatched, success)?;
        self.publish_heartbeat(health, &dispatched, success).await?;

        Ok(SupervisorRunSummary {
            health,
            restarted,
            dispatched,
            success,
        })
    }

    /// Read the watcher's lock owner record (if any) and probe liveness.
    /// A stale lock whose owning process is gone reads as [`WatcherHealth::Dead`],
    /// not an error — that's exactly the condition supervision exists to catch.
    pub fn check_watcher_health(&self) -> Result<WatcherHealth, EngineError> {
        let lock_dir = self.layout.lock_dir_for(&self.worker_id);
        let owner = match InstanceLock::read_owner(&lock_dir) {
            Ok(owner) => owner,
            Err(flagline_fsops::FsError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                return Ok(WatcherHealth::NeverStarted);
            }
            Err(other) => return Err(other.into()),
        };
        if self.process_control.is_alive(owner.pid) {
            Ok(WatcherHealth::Alive(owner.pid))
        } else {
            Ok(WatcherHealth::Dead)
        }
    }

    async fn restart_watcher(&self) -> Result<bool, EngineError> {
        let Some(command) = &self.restart_command else {
            tracing::warn!(worker_id = %self.worker_id, "watcher dead but no restart_command configured");
            return Ok(false);
        };
        if self.dry_run {
            return Ok(true);
        }

        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(false);
        };
        let mut cmd = Command::new(program);
        cmd.args(parts);
        match run_with_timeout(cmd, CODE_OPERATION_TIMEOUT, "restart_watcher").await {
            Ok(output) => Ok(output.status.success()),
            Err(err) => {
                tracing::warn!(worker_id = %self.worker_id, error = %err, "restart_watcher command failed");
                Ok(false)
            }
        }
    }

    /// Scan `Worker_Inbox/` for supervisor flags addressed to this worker
    /// id, claim and execute them in priority order (ties broken by
    /// filename, mirroring a stable sort over an already-sorted scan).
    async fn dispatch_pending(&self) -> Result<Vec<DispatchedControl>, EngineError> {
        let mut candidates = self.scan_control_flags()?;
        candidates.sort_by_key(|(path, handler)| (handler.priority(), path.clone()));

        let mut dispatched = Vec::new();
        for (path, _) in candidates {
            let Some(claimed_path) = self.claim(&path)? else {
                continue;
            };
            dispatched.push(self.process_one(&claimed_path).await?);
        }
        Ok(dispatched)
    }

    fn scan_control_flags(&self) -> Result<Vec<(PathBuf, SupervisorHandler)>, EngineError> {
        let prefix = "supervisor_";
        let marker = format!("_{}_", self.worker_id);
        let mut matches = Vec::new();

        for entry in std::fs::read_dir(self.layout.worker_inbox())
            .map_err(|source| flagline_fsops::FsError::io(self.layout.worker_inbox(), source))?
        {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.starts_with(prefix) || !name.contains(&marker) || !name.ends_with(".flag") {
                continue;
            }
            let handler_token = &name[prefix.len()..name.find(&marker).unwrap_or(name.len())];
            if let Ok(handler) = SupervisorHandler::from_str(handler_token) {
                matches.push((path, handler));
            } else {
                tracing::warn!(file = name, "unrecognized supervisor flag handler, skipping");
            }
        }
        Ok(matches)
    }

    fn claim(&self, flag_path: &std::path::Path) -> Result<Option<PathBuf>, EngineError> {
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

    async fn process_one(&self, claimed_path: &std::path::Path) -> Result<DispatchedControl, EngineError> {
        let raw = std::fs::read_to_string(claimed_path)
            .map_err(|source| flagline_fsops::FsError::io(claimed_path.to_path_buf(), source))?;
        let payload: FlagPayload = serde_json::from_str(&raw).map_err(|source| EngineError::MalformedFlag {
            path: claimed_path.to_path_buf(),
            reason: source.to_string(),
        })?;

        let watcher_pid = match self.check_watcher_health()? {
            WatcherHealth::Alive(pid) => Some(pid),
            _ => None,
        };

        let outcome = match self.handlers.get(&payload.handler) {
            Some(handler) => {
                let ctx = SupervisorContext {
                    task_id: payload.task_id.clone(),
                    worker_id: self.worker_id.clone(),
                    params: payload.params.clone(),
                    watcher_pid,
                    process_control: self.process_control.clone(),
                    dry_run: self.dry_run,
                };
                handler.run(&ctx).await
            }
            None => crate::outcome::HandlerOutcome::failed(format!(
                "no supervisor handler registered for {:?}",
                payload.handler
            )),
        };

        let _ = std::fs::remove_file(claimed_path);

        Ok(DispatchedControl {
            task_id: payload.task_id,
            handler: payload.handler,
            label: payload.label,
            success: outcome.success,
            error: outcome.error,
        })
    }

    /// One `{pass_id}.result.json` / `.error.json` covering the whole
    /// pass, carrying an `actions` list of `"handler (label)"` tokens in
    /// dispatch order for the console to correlate back to job rows.
    fn publish_pass_result(&self, dispatched: &[DispatchedControl], success: bool) -> Result<(), EngineError> {
        let pass_id = generate_task_id_at(TaskIdKind::Task, Utc::now());
        let actions: Vec<String> = dispatched
            .iter()
            .map(|d| match &d.label {
                Some(label) => format!("{} ({label})", d.handler),
                None => d.handler.clone(),
            })
            .collect();
        let first_error = dispatched.iter().find_map(|d| d.error.clone());

        let result = ResultPayload {
            task_id: None,
            supervisor_id: Some(pass_id.clone()),
            worker_id: Some(self.worker_id.clone()),
            success,
            error: first_error,
            result: Some(serde_json::json!({
                "results": dispatched.iter().map(|d| serde_json::json!({
                    "task_id": d.task_id,
                    "handler": d.handler,
                    "success": d.success,
                    "error": d.error,
                })).collect::<Vec<_>>(),
            })),
            actions: Some(actions),
            completed_at: Utc::now(),
        };

        let suffix = if success { "result" } else { "error" };
        let path = self.layout.results().join(format!("{pass_id}.{suffix}.json"));
        let body = serde_json::to_vec_pretty(&result).map_err(|source| EngineError::Serialize {
            what: "supervisor pass result",
            source,
        })?;
        write_atomic(&path, &body)?;
        Ok(())
    }

    async fn publish_heartbeat(
        &self,
        health: WatcherHealth,
        dispatched: &[DispatchedControl],
        success: bool,
    ) -> Result<(), EngineError> {
        let summary = if success {
            let actions: Vec<&str> = dispatched.iter().map(|d| d.handler.as_str()).collect();
            format!("Supervisor OK - {}. Actions: [{}]", health.as_label(), actions.join(", "))
        } else {
            let msg = dispatched
                .iter()
                .find_map(|d| d.error.clone())
                .unwrap_or_else(|| "unknown failure".to_string());
            format!("Supervisor ERROR - {msg}. State: {}", health.as_label())
        };
        self.store
            .upsert_worker_heartbeat(&format!("{}-supervisor", self.worker_id), &summary)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
