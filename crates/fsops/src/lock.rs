// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-instance locking via atomic directory creation.
//!
//! `mkdir` without `O_EXCL`-equivalent fallback is inherently atomic on
//! POSIX filesystems (including NFS, per spec), so a lock is just a
//! directory that exactly one process manages to create. The directory
//! holds an `owner.json` record naming who's holding it, useful for
//! diagnosing a stuck lock without guessing.

use crate::error::FsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnerInfo {
    pub worker_id: String,
    pub pid: u32,
    pub hostname: String,
    pub executable_path: String,
    pub utc_locked_at: DateTime<Utc>,
}

impl OwnerInfo {
    pub fn current(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            pid: std::process::id(),
            hostname: current_hostname(),
            executable_path: std::env::current_exe()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "unknown".to_string()),
            utc_locked_at: Utc::now(),
        }
    }
}

fn current_hostname() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::fs::read_to_string("/etc/hostname").map(|s| s.trim().to_string()))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// A held single-instance lock. Dropping it releases the lock as a
/// best-effort fallback; callers should still call [`InstanceLock::release`]
/// explicitly so release failures are observable.
pub struct InstanceLock {
    dir: PathBuf,
    released: bool,
}

impl InstanceLock {
    /// Acquire the lock at `dir`, writing an `owner.json` inside once the
    /// directory is created. Fails with [`FsError::AlreadyLocked`] if the
    /// directory already exists, whether or not its owner is still alive
    /// — stale-lock recovery is an operator action (inspect `owner.json`,
    /// remove the directory), not something this type guesses at.
    pub fn acquire(dir: impl Into<PathBuf>, owner: OwnerInfo) -> Result<Self, FsError> {
        let dir = dir.into();
        match std::fs::create_dir(&dir) {
            Ok(()) => {}
            Err(source) if source.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(FsError::AlreadyLocked { path: dir });
            }
            Err(source) => return Err(FsError::io(dir, source)),
        }

        let owner_path = dir.join("owner.json");
        let body = serde_json::to_vec_pretty(&owner).map_err(|source| FsError::io(
            owner_path.clone(),
            std::io::Error::new(std::io::ErrorKind::InvalidData, source),
        ))?;
        crate::atomic::write_atomic(&owner_path, &body)?;

        Ok(Self {
            dir,
            released: false,
        })
    }

    /// Read back the `owner.json` record in a lock directory without
    /// holding the lock, for `diagnostics`-style reporting.
    pub fn read_owner(dir: &Path) -> Result<OwnerInfo, FsError> {
        let owner_path = dir.join("owner.json");
        let body = std::fs::read_to_string(&owner_path).map_err(|source| FsError::io(owner_path.clone(), source))?;
        serde_json::from_str(&body).map_err(|source| FsError::CorruptOwnerRecord {
            path: owner_path,
            reason: source.to_string(),
        })
    }

    /// Release the lock: remove `owner.json` then the directory.
    /// Idempotent — calling this twice (or once after `Drop` already
    /// tried) is not an error.
    pub fn release(&mut self) -> Result<(), FsError> {
        if self.released {
            return Ok(());
        }
        let owner_path = self.dir.join("owner.json");
        if let Err(source) = std::fs::remove_file(&owner_path) {
            if source.kind() != std::io::ErrorKind::NotFound {
                return Err(FsError::io(owner_path, source));
            }
        }
        match std::fs::remove_dir(&self.dir) {
            Ok(()) => {}
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(FsError::io(self.dir.clone(), source)),
        }
        self.released = true;
        Ok(())
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.release();
        }
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
