// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared logging setup for the three binaries.
//!
//! Writes to `logging.dir` when configured (rotation is daily, matching
//! the original service's log tree conventions), or stderr otherwise.
//! The returned guard must be held for the process lifetime — dropping
//! it early silently stops flushing buffered log lines.

use flagline_config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber for `binary_name`, honoring
/// `RUST_LOG` if set and falling back to `logging.level` otherwise.
pub fn init_logging(binary_name: &str, config: &LoggingConfig) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    match &config.dir {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let appender = tracing_appender::rolling::daily(dir, format!("{binary_name}.log"));
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(non_blocking))
                .init();
            guard
        }
        None => {
            let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(non_blocking))
                .init();
            guard
        }
    }
}
