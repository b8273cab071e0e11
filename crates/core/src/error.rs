// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation-class errors: rejected input, never a transient condition.
//!
//! These are distinct from the I/O and storage errors defined in
//! flagline-fsops and flagline-storage, which wrap transient failures
//! (disk full, connection dropped) that a caller might retry.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("label must not be empty")]
    EmptyLabel,

    #[error("label is {len} characters, exceeding the {max} character limit")]
    LabelTooLong { len: usize, max: usize },

    #[error("label {0:?} contains characters outside [A-Za-z0-9 _-]")]
    LabelInvalidChars(String),

    #[error("{0:?} is not a recognized handler")]
    UnknownHandler(String),

    #[error("task id {0:?} does not match the {{kind}}_{{date}}_{{time}}_{{rand}} grammar")]
    MalformedTaskId(String),
}
