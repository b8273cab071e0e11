// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed sets of handler names the orchestrator understands.
//!
//! Supervisor and job handlers are disjoint namespaces: a flag's handler
//! string is looked up in exactly one of these two tables depending on
//! which directory the flag was filed in.

use std::fmt;
use std::str::FromStr;

/// Handlers a supervisor flag may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupervisorHandler {
    PauseWatcher,
    ResumeWatcher,
    RestartWatcher,
    UpdateCode,
    UpdateCodeDeps,
    RollbackCode,
    Diagnostics,
    VerifyDb,
}

impl SupervisorHandler {
    pub const ALL: [SupervisorHandler; 8] = [
        SupervisorHandler::PauseWatcher,
        SupervisorHandler::ResumeWatcher,
        SupervisorHandler::RestartWatcher,
        SupervisorHandler::UpdateCode,
        SupervisorHandler::UpdateCodeDeps,
        SupervisorHandler::RollbackCode,
        SupervisorHandler::Diagnostics,
        SupervisorHandler::VerifyDb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SupervisorHandler::PauseWatcher => "pause_watcher",
            SupervisorHandler::ResumeWatcher => "resume_watcher",
            SupervisorHandler::RestartWatcher => "restart_watcher",
            SupervisorHandler::UpdateCode => "update_code",
            SupervisorHandler::UpdateCodeDeps => "update_code_deps",
            SupervisorHandler::RollbackCode => "rollback_code",
            SupervisorHandler::Diagnostics => "diagnostics",
            SupervisorHandler::VerifyDb => "verify_db",
        }
    }

    /// Dispatch priority — lower runs first. Unknown handlers sort last
    /// and are skipped with a warning by the caller, never executed.
    pub fn priority(self) -> u32 {
        match self {
            SupervisorHandler::RollbackCode => 10,
            SupervisorHandler::UpdateCodeDeps => 11,
            SupervisorHandler::UpdateCode => 12,
            SupervisorHandler::PauseWatcher => 20,
            SupervisorHandler::ResumeWatcher => 21,
            SupervisorHandler::RestartWatcher => 22,
            SupervisorHandler::Diagnostics => 30,
            SupervisorHandler::VerifyDb => 31,
        }
    }
}

impl fmt::Display for SupervisorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SupervisorHandler {
    type Err = UnknownHandler;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SupervisorHandler::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| UnknownHandler(s.to_string()))
    }
}

/// Handlers a job flag may name. Currently a single member; the set is
/// expected to grow as new acquisition pipelines are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobHandler {
    AcquireSource,
}

impl JobHandler {
    pub const ALL: [JobHandler; 1] = [JobHandler::AcquireSource];

    pub fn as_str(self) -> &'static str {
        match self {
            JobHandler::AcquireSource => "acquire_source",
        }
    }
}

impl fmt::Display for JobHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobHandler {
    type Err = UnknownHandler;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobHandler::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| UnknownHandler(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown handler: {0}")]
pub struct UnknownHandler(pub String);

/// Either flavor of handler, for code that needs to treat both uniformly
/// (e.g. logging which handler a flag named before it's known which
/// registry it belongs to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Supervisor(SupervisorHandler),
    Job(JobHandler),
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Supervisor(h) => write!(f, "{h}"),
            Handler::Job(h) => write!(f, "{h}"),
        }
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
