//! Every binary prints usage and exits 0 on `--help`.

use crate::prelude::{cli, Binary};

#[test]
fn watcher_help_mentions_worker_id() {
    cli(Binary::Watcher).args(&["--help"]).passes().stdout_has("--worker-id");
}

#[test]
fn supervisor_help_mentions_worker_id() {
    cli(Binary::Supervisor).args(&["--help"]).passes().stdout_has("--worker-id");
}

#[test]
fn console_help_lists_subcommands() {
    cli(Binary::Console)
        .args(&["--help"])
        .passes()
        .stdout_has("create-job")
        .stdout_has("create-control")
        .stdout_has("process-results");
}
