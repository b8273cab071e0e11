// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! flagline-watcher: the long-running process that claims and dispatches
//! job flags addressed to one `worker_id`.

use clap::Parser;
use flagline_engine::{JobHandlerRegistry, Watcher};
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "flagline-watcher", about = "Claims and dispatches job flags for one worker")]
struct Args {
    #[arg(long)]
    config: PathBuf,
    #[arg(long = "worker-id")]
    worker_id: String,
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = flagline_config::load(&args.config)?;
    let _log_guard = flagline_cli::telemetry::init_logging("flagline-watcher", &config.logging);

    info!(worker_id = %args.worker_id, "starting watcher");

    let (layout, store) = flagline_cli::bootstrap(&config).await?;

    // No acquisition-pipeline job handlers are wired in by default; a
    // deployment with actual `acquire_source` business logic registers
    // it here before calling `run()`.
    let handlers = JobHandlerRegistry::new();

    let dry_run = args.dry_run || config.watcher.dry_run;
    let mut watcher = Watcher::new(
        layout,
        args.worker_id,
        handlers,
        store,
        Duration::from_secs(config.watcher.scan_interval_seconds),
        Duration::from_secs(config.watcher.heartbeat_interval_seconds),
        dry_run,
    );

    let shutdown = watcher.shutdown_handle();
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }
        shutdown.store(true, std::sync::atomic::Ordering::SeqCst);
    });

    if let Err(err) = watcher.run().await {
        error!(error = %err, "watcher exited with an error");
        return Err(err.into());
    }

    info!("watcher stopped");
    Ok(())
}
