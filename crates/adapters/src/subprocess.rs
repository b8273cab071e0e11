// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Default timeout for `update_code` / `update_code_deps` / `rollback_code`
/// control handlers, which shell out to package managers and VCS tools.
pub const CODE_OPERATION_TIMEOUT: Duration = Duration::from_secs(600);

/// Default timeout for `diagnostics` / `verify_db` control handlers.
pub const DIAGNOSTIC_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for the optional post-handler external command.
pub const POST_HANDLER_COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

/// Run a subprocess command with a timeout.
///
/// Wraps `Command::output()` with `tokio::time::timeout`, converting
/// timeout expiration into a descriptive error message. The child process
/// is killed automatically if the timeout elapses, via tokio's `Child`
/// drop implementation.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{description} failed: {io_err}")),
        Err(_elapsed) => Err(format!(
            "{description} timed out after {}s",
            timeout.as_secs()
        )),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
