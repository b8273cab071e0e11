// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use flagline_core::ValidationError;
use flagline_fsops::FsError;
use flagline_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to (de)serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("result file {path} does not match either the job-result or supervisor-result shape")]
    MalformedResult { path: std::path::PathBuf },

    #[error("worker_id must not be empty for a supervisor control flag")]
    EmptyWorkerId,
}
