// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flagline-adapters: process control and subprocess execution — the
//! layer that actually signals watcher processes and shells out to the
//! commands control handlers drive.

pub mod error;
pub mod process;
pub mod prompt;
pub mod subprocess;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use error::AdapterError;
pub use process::{ControlSignal, ProcessControl, UnixProcessControl};
pub use prompt::{PromptOutcome, PromptRunner, MAX_PROMPT_BYTES};
pub use subprocess::run_with_timeout;

#[cfg(feature = "test-support")]
pub use test_support::FakeProcessControl;
