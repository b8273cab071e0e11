// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Fs(#[from] flagline_fsops::FsError),

    #[error(transparent)]
    Storage(#[from] flagline_storage::StorageError),

    #[error(transparent)]
    Adapter(#[from] flagline_adapters::AdapterError),

    #[error("malformed flag payload at {path}: {reason}")]
    MalformedFlag { path: std::path::PathBuf, reason: String },

    #[error("malformed result payload at {path}: {reason}")]
    MalformedResult { path: std::path::PathBuf, reason: String },

    #[error("no handler registered for {0:?}")]
    UnknownHandler(String),

    #[error("failed to serialize {what} for writing: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
