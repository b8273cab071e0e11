// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A fake [`ProcessControl`] double, available under the `test-support`
//! feature so engine-crate tests can exercise supervisor control
//! handlers without sending real signals.

use crate::error::AdapterError;
use crate::process::{ControlSignal, ProcessControl};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct FakeProcessControl {
    alive: Mutex<HashSet<u32>>,
    signals_sent: Mutex<Vec<(u32, ControlSignal)>>,
    fail_signals_for: Mutex<HashMap<u32, ()>>,
}

impl FakeProcessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_alive(&self, pid: u32) {
        self.alive.lock().insert(pid);
    }

    pub fn mark_dead(&self, pid: u32) {
        self.alive.lock().remove(&pid);
    }

    pub fn fail_signals_to(&self, pid: u32) {
        self.fail_signals_for.lock().insert(pid, ());
    }

    pub fn signals_sent(&self) -> Vec<(u32, ControlSignal)> {
        self.signals_sent.lock().clone()
    }
}

#[async_trait]
impl ProcessControl for FakeProcessControl {
    fn signal(&self, pid: u32, signal: ControlSignal) -> Result<(), AdapterError> {
        if self.fail_signals_for.lock().contains_key(&pid) {
            return Err(AdapterError::NoSuchProcess(pid as i32));
        }
        self.signals_sent.lock().push((pid, signal));
        match signal {
            ControlSignal::Terminate => {
                self.alive.lock().remove(&pid);
            }
            ControlSignal::Pause | ControlSignal::Resume => {}
        }
        Ok(())
    }

    fn is_alive(&self, pid: u32) -> bool {
        self.alive.lock().contains(&pid)
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
