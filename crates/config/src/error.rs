// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("required environment variable {0:?} is not set and has no default")]
    MissingEnvVar(String),

    #[error("malformed ${{...}} reference in config: {0:?}")]
    MalformedReference(String),

    #[error("failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}
