// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The value every handler returns, independent of which registry it
//! came from — the watcher and supervisor cores turn this into a
//! [`flagline_core::ResultPayload`] and write it to `results/`.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOutcome {
    pub success: bool,
    pub error: Option<String>,
    pub detail: Value,
}

impl HandlerOutcome {
    pub fn ok(detail: Value) -> Self {
        Self {
            success: true,
            error: None,
            detail,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            detail: Value::Null,
        }
    }
}
