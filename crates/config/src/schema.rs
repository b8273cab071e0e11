// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The config document shape shared by the watcher, supervisor and
//! console binaries.

use serde::Deserialize;
use std::path::PathBuf;

fn default_pool_size() -> u32 {
    5
}

fn default_query_timeout_seconds() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_scan_interval_seconds() -> u64 {
    30
}

fn default_heartbeat_interval_seconds() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_query_timeout_seconds")]
    pub query_timeout_seconds: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WatcherConfig {
    #[serde(default = "default_scan_interval_seconds")]
    pub scan_interval_seconds: u64,
    #[serde(default = "default_heartbeat_interval_seconds")]
    pub heartbeat_interval_seconds: u64,
    /// Optional external command run after every handler dispatch, fed a
    /// bounded prompt file and expected to emit tolerant JSON on stdout.
    #[serde(default)]
    pub post_handler_command: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            scan_interval_seconds: default_scan_interval_seconds(),
            heartbeat_interval_seconds: default_heartbeat_interval_seconds(),
            post_handler_command: None,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SupervisorConfig {
    /// Whether the supervisor restarts a watcher it finds dead during its
    /// health check pass. Defaults on; set to `false` to require an
    /// operator to issue an explicit `restart_watcher` control flag.
    #[serde(default = "default_true")]
    pub auto_restart: bool,
    /// Command run to relaunch a watcher found dead, when `auto_restart`
    /// is set. Required for auto-restart to do anything beyond logging —
    /// a dead process can't be revived by signaling it.
    #[serde(default)]
    pub restart_command: Option<String>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            auto_restart: true,
            restart_command: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    /// Directory to move processed result files into. `None` means the
    /// Result Consumer deletes them once handled.
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { archive_dir: None }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub nas_root: PathBuf,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
    #[serde(default)]
    pub supervisor: SupervisorConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
