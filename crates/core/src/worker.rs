// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `workers_t` row shape: one row per watcher instance, upserted on
//! every heartbeat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of `workers_t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRow {
    pub worker_id: String,
    pub last_heartbeat_at: DateTime<Utc>,
    pub status_summary: String,
}

impl WorkerRow {
    /// Whether this worker's last heartbeat is older than `max_age` —
    /// the supervisor's stall-detection check.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        now.signed_duration_since(self.last_heartbeat_at) > max_age
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
