// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! flagline-console: the operator-facing CLI over the Flag Producer and
//! Result Consumer. One-shot invocations, not a daemon.

use clap::{Parser, Subcommand};
use flagline_console::{CleanupPolicy, FlagProducer, ResultConsumer};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "flagline-console", about = "Create job/control flags and drain results")]
struct Args {
    #[arg(long)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// File a job flag for the watcher to pick up.
    CreateJob {
        #[arg(long)]
        handler: String,
        /// Actor recorded in the audit log (operator name or service id).
        #[arg(long)]
        actor: String,
        #[arg(long)]
        label: Option<String>,
        /// JSON object of handler params, e.g. '{"source":"..."}'.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// File a supervisor control flag for a specific worker.
    CreateControl {
        #[arg(long)]
        handler: String,
        #[arg(long = "worker-id")]
        worker_id: String,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Drain and apply every pending result file.
    ProcessResults,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = flagline_config::load(&args.config)?;
    let _log_guard = flagline_cli::telemetry::init_logging("flagline-console", &config.logging);

    let (layout, store) = flagline_cli::bootstrap(&config).await?;

    match args.command {
        Command::CreateJob {
            handler,
            actor,
            label,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)?;
            let producer = FlagProducer::new(layout, store);
            let created = producer
                .create_job_flag(&actor, &handler, params, label.as_deref())
                .await?;
            info!(task_id = %created.task_id, job_id = created.job_id, "created job flag");
            println!("{}", created.task_id);
        }
        Command::CreateControl {
            handler,
            worker_id,
            actor,
            label,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)?;
            let producer = FlagProducer::new(layout, store);
            let created = producer
                .create_supervisor_flag(&actor, &handler, &worker_id, params, label.as_deref())
                .await?;
            info!(task_id = %created.task_id, job_id = created.job_id, "created control flag");
            println!("{}", created.task_id);
        }
        Command::ProcessResults => {
            let cleanup = match &config.console.archive_dir {
                Some(dir) => CleanupPolicy::Archive(dir.clone()),
                None => CleanupPolicy::Delete,
            };
            let consumer = ResultConsumer::new(layout, store, cleanup);
            let processed = consumer.process_pending_results().await?;
            info!(count = processed.len(), "processed result files");
            for item in &processed {
                println!("{:?}", item.outcome);
            }
        }
    }

    Ok(())
}
