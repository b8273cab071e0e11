// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The data a handler needs to act, assembled from a flag payload before
//! dispatch.

use flagline_adapters::ProcessControl;
use serde_json::Value;
use std::sync::Arc;

/// Everything an `acquire_source`-style job handler needs.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub task_id: String,
    pub target_ref: String,
    pub label: Option<String>,
    pub params: Value,
    pub dry_run: bool,
}

/// Everything a supervisor control handler needs, including a handle on
/// the watcher process it's addressing.
#[derive(Clone)]
pub struct SupervisorContext {
    pub task_id: String,
    pub worker_id: String,
    pub params: Value,
    pub watcher_pid: Option<u32>,
    pub process_control: Arc<dyn ProcessControl>,
    pub dry_run: bool,
}
