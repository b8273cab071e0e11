// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The built-in supervisor control handlers.
//!
//! `pause_watcher` / `resume_watcher` / `restart_watcher` act directly on
//! the watcher's pid via [`ProcessControl`]. The remaining four
//! (`update_code`, `update_code_deps`, `rollback_code`, `diagnostics`,
//! `verify_db`) shell out to an operator-configured command named in the
//! flag's params — the engine crate doesn't know what "update the code"
//! means for a given deployment, only how to run it with a bound and
//! report what happened.

use crate::context::SupervisorContext;
use crate::outcome::HandlerOutcome;
use crate::registry::SupervisorHandlerRegistry;
use flagline_adapters::subprocess::{run_with_timeout, CODE_OPERATION_TIMEOUT, DIAGNOSTIC_TIMEOUT};
use flagline_adapters::{ControlSignal, ProcessControl};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

async fn signal_handler(ctx: &SupervisorContext, signal: ControlSignal) -> HandlerOutcome {
    let Some(pid) = ctx.watcher_pid else {
        return HandlerOutcome::failed("no watcher pid known for this worker");
    };
    if ctx.dry_run {
        return HandlerOutcome::ok(serde_json::json!({"dry_run": true, "pid": pid}));
    }
    match ctx.process_control.signal(pid, signal) {
        Ok(()) => HandlerOutcome::ok(serde_json::json!({"pid": pid})),
        Err(err) => HandlerOutcome::failed(err.to_string()),
    }
}

/// Run the shell command named in `ctx.params["command"]`, bounded by
/// `timeout`. Missing a `command` param is a handler-level failure, not
/// a panic — a malformed control flag must not take the supervisor down.
async fn run_configured_command(
    ctx: &SupervisorContext,
    timeout: Duration,
    description: &'static str,
) -> HandlerOutcome {
    let Some(command) = ctx.params.get("command").and_then(|v| v.as_str()) else {
        return HandlerOutcome::failed(format!("{description} requires a \"command\" param"));
    };
    if ctx.dry_run {
        return HandlerOutcome::ok(serde_json::json!({"dry_run": true, "command": command}));
    }

    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return HandlerOutcome::failed(format!("{description} command is empty"));
    };
    let mut cmd = Command::new(program);
    cmd.args(parts);

    match run_with_timeout(cmd, timeout, description).await {
        Ok(output) => HandlerOutcome {
            success: output.status.success(),
            error: (!output.status.success())
                .then(|| String::from_utf8_lossy(&output.stderr).into_owned()),
            detail: serde_json::json!({
                "stdout": String::from_utf8_lossy(&output.stdout),
                "exit_code": output.status.code(),
            }),
        },
        Err(err) => HandlerOutcome::failed(err),
    }
}

/// Build the supervisor handler registry with the built-in
/// implementations wired to a real [`ProcessControl`]. Callers may
/// overwrite entries afterward to customize behavior per deployment.
pub fn default_supervisor_handlers() -> SupervisorHandlerRegistry {
    let mut registry = SupervisorHandlerRegistry::new();

    registry.register(
        "pause_watcher",
        Arc::new(|ctx: SupervisorContext| async move { signal_handler(&ctx, ControlSignal::Pause).await }),
    );
    registry.register(
        "resume_watcher",
        Arc::new(|ctx: SupervisorContext| async move { signal_handler(&ctx, ControlSignal::Resume).await }),
    );
    registry.register(
        "restart_watcher",
        Arc::new(|ctx: SupervisorContext| async move {
            signal_handler(&ctx, ControlSignal::Terminate).await
        }),
    );
    registry.register(
        "update_code",
        Arc::new(|ctx: SupervisorContext| async move {
            run_configured_command(&ctx, CODE_OPERATION_TIMEOUT, "update_code").await
        }),
    );
    registry.register(
        "update_code_deps",
        Arc::new(|ctx: SupervisorContext| async move {
            run_configured_command(&ctx, CODE_OPERATION_TIMEOUT, "update_code_deps").await
        }),
    );
    registry.register(
        "rollback_code",
        Arc::new(|ctx: SupervisorContext| async move {
            run_configured_command(&ctx, CODE_OPERATION_TIMEOUT, "rollback_code").await
        }),
    );
    registry.register(
        "diagnostics",
        Arc::new(|ctx: SupervisorContext| async move {
            run_configured_command(&ctx, DIAGNOSTIC_TIMEOUT, "diagnostics").await
        }),
    );
    registry.register(
        "verify_db",
        Arc::new(|ctx: SupervisorContext| async move {
            run_configured_command(&ctx, DIAGNOSTIC_TIMEOUT, "verify_db").await
        }),
    );

    registry
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
