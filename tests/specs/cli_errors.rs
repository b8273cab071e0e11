//! Argument validation errors, exercised without touching Postgres or
//! the NAS mount.

use crate::prelude::{cli, Binary};

#[test]
fn watcher_without_worker_id_fails_with_usage_error() {
    cli(Binary::Watcher)
        .args(&["--config", "/nonexistent.yaml"])
        .fails()
        .stderr_has("worker-id");
}

#[test]
fn supervisor_without_config_fails_with_usage_error() {
    cli(Binary::Supervisor)
        .args(&["--worker-id", "watcher-1"])
        .fails()
        .stderr_has("config");
}

#[test]
fn console_unknown_subcommand_fails() {
    cli(Binary::Console)
        .args(&["--config", "/nonexistent.yaml", "bogus-command"])
        .fails();
}

#[test]
fn console_create_control_without_worker_id_fails_with_usage_error() {
    cli(Binary::Console)
        .args(&[
            "--config",
            "/nonexistent.yaml",
            "create-control",
            "--handler",
            "pause_watcher",
            "--actor",
            "operator",
        ])
        .fails()
        .stderr_has("worker-id");
}
