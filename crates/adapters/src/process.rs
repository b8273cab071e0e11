// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process control primitives the supervisor uses to pause, resume and
//! restart a watcher instance by signal.

use crate::error::AdapterError;
use async_trait::async_trait;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

/// The signals the supervisor's control handlers send. `pause_watcher`
/// and `resume_watcher` use stop/continue rather than a custom IPC
/// channel so a plain `kill -l`-aware operator can reason about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Pause,
    Resume,
    Terminate,
}

impl ControlSignal {
    fn as_nix_signal(self) -> Signal {
        match self {
            ControlSignal::Pause => Signal::SIGSTOP,
            ControlSignal::Resume => Signal::SIGCONT,
            ControlSignal::Terminate => Signal::SIGTERM,
        }
    }
}

/// Abstracts process control so the engine crate can be tested without
/// sending real signals. The real implementation is [`UnixProcessControl`];
/// [`crate::test_support::FakeProcessControl`] is the test double.
#[async_trait]
pub trait ProcessControl: Send + Sync {
    fn signal(&self, pid: u32, signal: ControlSignal) -> Result<(), AdapterError>;

    /// Whether a pid currently refers to a live process. Implemented via
    /// `kill(pid, 0)`, which performs no action but still validates the
    /// pid, per POSIX.
    fn is_alive(&self, pid: u32) -> bool;
}

pub struct UnixProcessControl;

impl ProcessControl for UnixProcessControl {
    fn signal(&self, pid: u32, control: ControlSignal) -> Result<(), AdapterError> {
        let nix_pid = Pid::from_raw(pid as i32);
        signal::kill(nix_pid, control.as_nix_signal()).map_err(|source| AdapterError::Signal {
            pid: pid as i32,
            source,
        })
    }

    fn is_alive(&self, pid: u32) -> bool {
        signal::kill(Pid::from_raw(pid as i32), None).is_ok()
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
