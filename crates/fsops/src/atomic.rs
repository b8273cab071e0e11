// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic writes and claims on a shared filesystem.
//!
//! Two distinct rename idioms are used throughout the orchestrator:
//! [`write_atomic`], which overwrites the destination if present (used
//! for heartbeat files and result files, where the latest write wins),
//! and [`claim_rename`], which fails if the destination already exists
//! (used to move a flag from the inbox into `processing/`, where two
//! watchers racing on the same flag must not both succeed).

use crate::error::FsError;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write `contents` to `path`, replacing any existing file, such that a
/// concurrent reader never observes a partial write.
///
/// Writes to a sibling `.tmp-{pid}` file in the same directory (so the
/// final rename stays on one filesystem), fsyncs it, then renames it
/// over `path`. The temp file is best-effort cleaned up on any failure
/// before the rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
    let dir = path.parent().ok_or_else(|| FsError::InaccessibleDirectory {
        path: path.to_path_buf(),
    })?;
    let tmp_path = dir.join(format!(
        ".tmp-{}-{}",
        std::process::id(),
        path.file_name().and_then(|n| n.to_str()).unwrap_or("flag")
    ));

    let write_result = (|| -> Result<(), std::io::Error> {
        let mut file = File::create(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        Ok(())
    })();

    if let Err(source) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(FsError::io(tmp_path, source));
    }

    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        FsError::io(path, source)
    })
}

/// Move `from` to `to`, failing if `to` already exists or `from` is
/// gone. Used for the watcher's claim step: exactly one racing watcher
/// sees success, the rest see [`FsError::AlreadyClaimed`].
///
/// `fs::rename` on POSIX overwrites silently, so this stages through a
/// hardlink-then-unlink pair to get fail-if-exists semantics portably.
pub fn claim_rename(from: &Path, to: &Path) -> Result<(), FsError> {
    match fs::hard_link(from, to) {
        Ok(()) => {}
        Err(source) if source.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(FsError::AlreadyClaimed {
                path: to.to_path_buf(),
            });
        }
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Err(FsError::AlreadyClaimed {
                path: from.to_path_buf(),
            });
        }
        Err(source) => return Err(FsError::io(from, source)),
    }

    // The claim already succeeded at this point (`to` exists and is
    // visible to every other watcher). Failing to remove the original
    // leaves a harmless duplicate hardlink behind, not a correctness
    // problem, so it's logged rather than surfaced as claim failure.
    if let Err(source) = fs::remove_file(from) {
        tracing::warn!(from = %from.display(), error = %source, "failed to unlink original after claim");
    }
    Ok(())
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
