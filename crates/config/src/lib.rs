// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flagline-config: YAML configuration with `${VAR}` / `${VAR:default}`
//! environment substitution.
//!
//! Substitution happens textually, before the YAML parser ever sees the
//! document, so a default value can itself contain YAML-meaningful
//! characters without needing escaping rules of its own.

pub mod error;
pub mod schema;
pub mod substitute;

pub use error::ConfigError;
pub use schema::{Config, ConsoleConfig, DatabaseConfig, LoggingConfig, SupervisorConfig, WatcherConfig};
pub use substitute::substitute_env_vars;

use std::path::Path;

/// Load and parse a config file: read it, substitute `${VAR}` /
/// `${VAR:default}` references against the process environment, then
/// deserialize the result as YAML.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&raw)
}

/// Load a config document already in memory, e.g. from a test fixture.
pub fn load_str(raw: &str) -> Result<Config, ConfigError> {
    let substituted = substitute_env_vars(raw)?;
    serde_yaml::from_str(&substituted).map_err(ConfigError::Parse)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
