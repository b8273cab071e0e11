// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The result payload: the JSON body written inside every `.result.json`
//! and `.error.json` file, and the logic the console uses to route it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The JSON body a handler (or the watcher wrapping it) writes back after
/// a flag is processed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Present on control-flag (supervisor-pass) results: one `"handler
    /// (label)"` entry per control flag dispatched, in priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    pub completed_at: DateTime<Utc>,
}

/// Which side of the console a result belongs to, recovered from which
/// identifying fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultKind {
    Job { task_id: String },
    Supervisor { supervisor_id: String, worker_id: String },
}

impl ResultPayload {
    /// A result naming `task_id` is a job result; one naming both
    /// `supervisor_id` and `worker_id` is a supervisor result. A payload
    /// matching neither shape is malformed and routed to neither path.
    pub fn kind(&self) -> Option<ResultKind> {
        if let Some(task_id) = &self.task_id {
            return Some(ResultKind::Job {
                task_id: task_id.clone(),
            });
        }
        if let (Some(supervisor_id), Some(worker_id)) = (&self.supervisor_id, &self.worker_id) {
            return Some(ResultKind::Supervisor {
                supervisor_id: supervisor_id.clone(),
                worker_id: worker_id.clone(),
            });
        }
        None
    }

    /// Extract an error message for a failed (or ambiguous) result,
    /// preferring the top-level `error` field, then `result.error`, and
    /// finally `None` when `success` is true and no error was reported.
    pub fn extract_error(&self) -> Option<String> {
        if let Some(err) = &self.error {
            return Some(err.clone());
        }
        self.result
            .as_ref()
            .and_then(|r| r.get("error"))
            .and_then(|e| e.as_str())
            .map(str::to_string)
    }

    /// Split a combined action token ("pause_watcher reason=maintenance")
    /// on the first space and return just the handler name.
    pub fn handler_from_action(action: &str) -> &str {
        action
            .split_once(crate::flag::ACTION_SPLIT_POINT)
            .map(|(handler, _rest)| handler)
            .unwrap_or(action)
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
