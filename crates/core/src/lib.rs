// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flagline-core: shared domain types for the flag-file job orchestrator.
//!
//! These types are intentionally free of filesystem and database access —
//! they describe the wire format and lifecycle, not how it's moved around.

pub mod audit;
pub mod error;
pub mod flag;
pub mod handler;
pub mod id;
pub mod job;
pub mod result;
pub mod worker;

pub use audit::AuditEntry;
pub use error::ValidationError;
pub use flag::{summarize_params, validate_label, FlagPayload, ACTION_SPLIT_POINT};
pub use handler::{Handler, JobHandler, SupervisorHandler};
pub use id::{generate_task_id, generate_task_id_at, parse_task_id, ParsedTaskId, TaskIdKind};
pub use job::{JobRecord, JobState};
pub use result::{ResultKind, ResultPayload};
pub use worker::WorkerRow;
