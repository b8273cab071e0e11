// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} already claimed by another worker")]
    AlreadyClaimed { path: PathBuf },

    #[error("lock directory {path} is already held")]
    AlreadyLocked { path: PathBuf },

    #[error("owner record at {path} is corrupt: {reason}")]
    CorruptOwnerRecord { path: PathBuf, reason: String },

    #[error("required directory {path} is missing or inaccessible")]
    InaccessibleDirectory { path: PathBuf },
}

impl FsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::Io {
            path: path.into(),
            source,
        }
    }
}
