// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("no process with pid {0}")]
    NoSuchProcess(i32),

    #[error("failed to signal pid {pid}: {source}")]
    Signal {
        pid: i32,
        #[source]
        source: nix::Error,
    },

    #[error("subprocess error: {0}")]
    Subprocess(String),

    #[error("prompt file at {0} exceeds the {1} byte limit")]
    PromptFileTooLarge(std::path::PathBuf, usize),

    #[error("failed to read prompt file {path}: {source}")]
    PromptFileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
