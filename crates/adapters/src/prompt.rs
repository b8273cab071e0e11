// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The optional post-handler external command: after a handler runs, the
//! watcher can feed a small prompt file to an operator-configured command
//! and fold whatever JSON it emits into the result payload. Used for
//! handler-specific enrichment (e.g. summarizing a diagnostics run)
//! without the watcher needing to know what that enrichment looks like.

use crate::error::AdapterError;
use crate::subprocess::{run_with_timeout, POST_HANDLER_COMMAND_TIMEOUT};
use std::path::Path;
use tokio::process::Command;

/// Prompt files larger than this are refused rather than streamed, since
/// the command is expected to read the whole thing into memory.
pub const MAX_PROMPT_BYTES: u64 = 100 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct PromptOutcome {
    pub raw_stdout: String,
    /// `Some` only if stdout parsed as JSON; a command that emits plain
    /// text is not an error, just has no structured payload to fold in.
    pub parsed: Option<serde_json::Value>,
    pub exit_success: bool,
}

/// Runs `command` with a prompt file's path as its sole argument. Kept
/// free of the handler-specific prompt *content* on purpose — that's the
/// caller's responsibility to write to `prompt_path` first.
pub struct PromptRunner {
    command: String,
}

impl PromptRunner {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Dry-run mode: validate the prompt file and report what would have
    /// run, without spawning the command.
    pub async fn run(&self, prompt_path: &Path, dry_run: bool) -> Result<PromptOutcome, AdapterError> {
        let metadata = tokio::fs::metadata(prompt_path)
            .await
            .map_err(|source| AdapterError::PromptFileRead {
                path: prompt_path.to_path_buf(),
                source,
            })?;
        if metadata.len() > MAX_PROMPT_BYTES {
            return Err(AdapterError::PromptFileTooLarge(
                prompt_path.to_path_buf(),
                MAX_PROMPT_BYTES as usize,
            ));
        }

        if dry_run {
            tracing::info!(
                command = %self.command,
                prompt_path = %prompt_path.display(),
                "dry-run: skipping post-handler command"
            );
            return Ok(PromptOutcome {
                raw_stdout: String::new(),
                parsed: None,
                exit_success: true,
            });
        }

        let mut cmd = Command::new(&self.command);
        cmd.arg(prompt_path);
        let output = run_with_timeout(cmd, POST_HANDLER_COMMAND_TIMEOUT, "post-handler command")
            .await
            .map_err(AdapterError::Subprocess)?;

        let raw_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let parsed = serde_json::from_str(raw_stdout.trim()).ok();

        Ok(PromptOutcome {
            raw_stdout,
            parsed,
            exit_success: output.status.success(),
        })
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
