// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! flagline-supervisor: a single health-check-and-dispatch pass over the
//! control flags addressed to one watcher instance. Meant to be invoked
//! on a schedule (cron, systemd timer), not run as a daemon.

use clap::Parser;
use flagline_adapters::UnixProcessControl;
use flagline_engine::{default_supervisor_handlers, Supervisor};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "flagline-supervisor", about = "Runs one supervisor pass for a watcher instance")]
struct Args {
    #[arg(long)]
    config: PathBuf,
    #[arg(long = "worker-id")]
    worker_id: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = flagline_config::load(&args.config)?;
    let _log_guard = flagline_cli::telemetry::init_logging("flagline-supervisor", &config.logging);

    info!(worker_id = %args.worker_id, "starting supervisor pass");

    let (layout, store) = flagline_cli::bootstrap(&config).await?;

    let supervisor = Supervisor::new(
        layout,
        args.worker_id,
        default_supervisor_handlers(),
        store,
        Arc::new(UnixProcessControl),
        config.supervisor.auto_restart,
        config.supervisor.restart_command.clone(),
        false,
    );

    match supervisor.run_once().await {
        Ok(summary) => {
            if summary.success {
                info!(
                    health = ?summary.health,
                    restarted = summary.restarted,
                    dispatched = summary.dispatched.len(),
                    "supervisor pass complete"
                );
                Ok(())
            } else {
                warn!(health = ?summary.health, "supervisor pass completed with failed control actions");
                std::process::exit(1);
            }
        }
        Err(err) => {
            error!(error = %err, "supervisor pass failed");
            Err(err.into())
        }
    }
}
