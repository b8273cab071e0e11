// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The flag payload: the JSON body written inside every `.flag` file.
//!
//! A flag's file name carries routing information (which handler, which
//! worker, which task), while the payload carries the data the handler
//! needs to act. Both are produced together and must agree — see
//! [`FlagPayload::expected_filename`].

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Labels may contain letters, digits, spaces, hyphens and underscores.
/// Anything else risks breaking filename construction on the shared NAS
/// mount (colons and slashes are the usual offenders).
#[allow(clippy::expect_used)] // constant regex pattern is valid
static LABEL_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[A-Za-z0-9 _-]+$").expect("constant regex pattern is valid"));

/// Labels longer than this are rejected outright rather than silently
/// truncated, so operators notice the mistake at submission time.
pub const MAX_LABEL_LEN: usize = 100;

/// Params summaries embedded in audit rows and log lines are capped here;
/// full params always remain recoverable from the flag payload itself.
pub const PARAMS_SUMMARY_MAX_LEN: usize = 512;

/// Truncated summaries are cut to this many characters before the
/// trailing `"..."` marker is appended, so the total length lands
/// exactly on [`PARAMS_SUMMARY_MAX_LEN`].
const PARAMS_SUMMARY_TRUNCATE_LEN: usize = 509;

/// When a result's `action` field combines a handler name with trailing
/// arguments ("pause_watcher reason=maintenance"), split on the first
/// space to recover just the handler token.
pub const ACTION_SPLIT_POINT: char = ' ';

/// The JSON body of a `.flag` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlagPayload {
    pub task_id: String,
    pub handler: String,
    /// Present on job flags, naming the source to acquire from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_ref: Option<String>,
    /// Present on supervisor flags, naming the watcher instance addressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub params: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl FlagPayload {
    /// The file name this payload must be written under, following the
    /// `{kind}_{handler}_{worker_id}_{task_id}.flag` / `job_{handler}_{task_id}.flag`
    /// discipline. Supervisor flags include the worker id so a single
    /// inbox can hold flags for many watcher instances.
    pub fn expected_filename(&self) -> String {
        match &self.worker_id {
            Some(worker_id) => format!(
                "supervisor_{}_{}_{}.flag",
                self.handler, worker_id, self.task_id
            ),
            None => format!("job_{}_{}.flag", self.handler, self.task_id),
        }
    }
}

/// Validate a label per spec: null/empty always passes; otherwise within
/// [`MAX_LABEL_LEN`] and matching [`LABEL_PATTERN`].
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Ok(());
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(ValidationError::LabelTooLong {
            len: label.len(),
            max: MAX_LABEL_LEN,
        });
    }
    if !LABEL_PATTERN.is_match(label) {
        return Err(ValidationError::LabelInvalidChars(label.to_string()));
    }
    Ok(())
}

/// Render a compact summary of a params JSON value (keys sorted, since
/// `serde_json::Value`'s map is a `BTreeMap`) for embedding in audit rows
/// and log lines. Serializations over [`PARAMS_SUMMARY_MAX_LEN`]
/// characters are cut to [`PARAMS_SUMMARY_TRUNCATE_LEN`] characters plus
/// a trailing `"..."`, landing exactly on the max length.
pub fn summarize_params(params: &serde_json::Value) -> String {
    let rendered = params.to_string();
    if rendered.chars().count() <= PARAMS_SUMMARY_MAX_LEN {
        return rendered;
    }
    let truncated: String = rendered.chars().take(PARAMS_SUMMARY_TRUNCATE_LEN).collect();
    format!("{truncated}...")
}

#[cfg(test)]
#[path = "flag_tests.rs"]
mod tests;
