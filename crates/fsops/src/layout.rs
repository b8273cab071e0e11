// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical layout of the shared NAS mount.
//!
//! ```text
//! <root>/
//!   Worker_Inbox/      flags waiting to be claimed
//!   Worker_Outbox/      (reserved for future outbound signaling)
//!   processing/        flags claimed by a worker, in flight
//!   results/           .result.json / .error.json files
//!   locks/             per-worker single-instance lock directories
//!   heartbeats/        per-worker heartbeat files
//! ```

use crate::error::FsError;
use std::path::{Path, PathBuf};

/// All six canonical subdirectories, for iteration in accessibility checks.
const SUBDIRS: [&str; 6] = [
    "Worker_Inbox",
    "Worker_Outbox",
    "processing",
    "results",
    "locks",
    "heartbeats",
];

#[derive(Debug, Clone)]
pub struct NasLayout {
    root: PathBuf,
}

impl NasLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn worker_inbox(&self) -> PathBuf {
        self.root.join("Worker_Inbox")
    }

    pub fn worker_outbox(&self) -> PathBuf {
        self.root.join("Worker_Outbox")
    }

    pub fn processing(&self) -> PathBuf {
        self.root.join("processing")
    }

    pub fn results(&self) -> PathBuf {
        self.root.join("results")
    }

    pub fn locks(&self) -> PathBuf {
        self.root.join("locks")
    }

    pub fn heartbeats(&self) -> PathBuf {
        self.root.join("heartbeats")
    }

    pub fn lock_dir_for(&self, worker_id: &str) -> PathBuf {
        self.locks().join(format!("{worker_id}.lock"))
    }

    pub fn heartbeat_file_for(&self, worker_id: &str) -> PathBuf {
        self.heartbeats().join(format!("{worker_id}.heartbeat.json"))
    }

    /// Create every canonical subdirectory if missing. Idempotent.
    pub fn ensure_created(&self) -> Result<(), FsError> {
        for name in SUBDIRS {
            let dir = self.root.join(name);
            std::fs::create_dir_all(&dir).map_err(|source| FsError::io(dir, source))?;
        }
        Ok(())
    }

    /// Verify every canonical subdirectory exists and is a directory,
    /// without creating anything. The watcher and supervisor call this
    /// at startup and refuse to run if the NAS mount isn't there — a
    /// silently-missing mount must never look like an empty inbox.
    pub fn check_accessible(&self) -> Result<(), FsError> {
        for name in SUBDIRS {
            let dir = self.root.join(name);
            if !dir.is_dir() {
                return Err(FsError::InaccessibleDirectory { path: dir });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
