// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `audit_log_t` row shape: a flat, append-only trail of who did what.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of `audit_log_t`. `details_json` carries handler-specific
/// context (params summaries, exit codes) that doesn't warrant its own
/// column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub details_json: serde_json::Value,
    pub ts: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        actor: impl Into<String>,
        action: impl Into<String>,
        target_type: impl Into<String>,
        target_id: impl Into<String>,
        details_json: serde_json::Value,
        ts: DateTime<Utc>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            target_type: target_type.into(),
            target_id: target_id.into(),
            details_json,
            ts,
        }
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
