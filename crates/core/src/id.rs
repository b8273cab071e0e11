// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task identifier generation and parsing.
//!
//! Format: `{kind}_{YYYYMMDD}_{HHMMSS}_{rand4}`, e.g. `job_20260205_215837_a7k2`.
//! The timestamp is UTC and the string sorts chronologically, which the
//! watcher's inbox scan relies on for dispatch ordering.

use chrono::{DateTime, NaiveDateTime, Utc};
use rand::distr::{Alphanumeric, SampleString};
use std::fmt;

/// Closed set of task id prefixes. `Task` is used for supervisor control
/// flags, `Job` for work flags — see spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskIdKind {
    Task,
    Job,
}

impl TaskIdKind {
    fn as_str(self) -> &'static str {
        match self {
            TaskIdKind::Task => "task",
            TaskIdKind::Job => "job",
        }
    }
}

impl fmt::Display for TaskIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task id parsed back into its constituent parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTaskId {
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub rand: String,
}

/// Generate a new task id of the given kind using the current UTC time.
///
/// Four lowercase-alphanumeric characters give ~1.7M combinations per
/// second-bucket, which spec §3 calls "globally unique with overwhelming
/// probability" rather than a hard guarantee — callers that need a hard
/// uniqueness guarantee should still dedupe on insert (task_id is a unique
/// column, see flagline-storage).
pub fn generate_task_id(kind: TaskIdKind) -> String {
    generate_task_id_at(kind, Utc::now())
}

/// Generate a task id stamped with an explicit time, for deterministic tests.
pub fn generate_task_id_at(kind: TaskIdKind, now: DateTime<Utc>) -> String {
    let rand_suffix: String = Alphanumeric
        .sample_string(&mut rand::rng(), 8)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(4)
        .collect();
    format!(
        "{}_{}_{}",
        kind.as_str(),
        now.format("%Y%m%d_%H%M%S"),
        rand_suffix
    )
}

/// Parse a task id produced by [`generate_task_id`] back into its parts.
///
/// Returns `None` if `task_id` doesn't match the `{kind}_{date}_{time}_{rand4}`
/// grammar — malformed ids are treated as opaque strings by callers, never
/// as a reason to panic.
pub fn parse_task_id(task_id: &str) -> Option<ParsedTaskId> {
    let parts: Vec<&str> = task_id.splitn(4, '_').collect();
    let [kind, date, time, rand] = parts.as_slice() else {
        return None;
    };

    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if time.len() != 6 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if rand.len() != 4 || !rand.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    if !kind.bytes().all(|b| b.is_ascii_alphabetic()) || kind.is_empty() {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S").ok()?;
    let timestamp = naive.and_utc();

    Some(ParsedTaskId {
        kind: (*kind).to_string(),
        timestamp,
        rand: (*rand).to_string(),
    })
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
