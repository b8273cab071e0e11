// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared scaffolding for the three binaries: logging setup and the
//! handful of startup steps (config load, NAS layout check, pool and
//! migrations) every one of them performs identically before diverging
//! into watcher/supervisor/console-specific behavior.

pub mod telemetry;

use flagline_config::Config;
use flagline_fsops::NasLayout;
use flagline_storage::{build_pool, run_migrations, PgStateStore, StateStore};
use std::sync::Arc;
use std::time::Duration;

/// Load config, verify the NAS mount is present, connect to the
/// database and run migrations. Every binary's first move.
pub async fn bootstrap(config: &Config) -> anyhow::Result<(NasLayout, Arc<dyn StateStore>)> {
    let layout = NasLayout::new(config.nas_root.clone());
    layout.check_accessible()?;

    let pool = build_pool(
        &config.database.url,
        config.database.pool_size,
        Duration::from_secs(config.database.query_timeout_seconds),
    )
    .await?;
    run_migrations(&pool).await?;

    let store: Arc<dyn StateStore> = Arc::new(PgStateStore::new(pool));
    Ok((layout, store))
}
