// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamic dispatch tables for job and supervisor handlers.
//!
//! The set of handler *names* is closed (see [`flagline_core::JobHandler`]
//! and [`flagline_core::SupervisorHandler`]), but what each one *does* is
//! registered at startup so the watcher/supervisor binaries can be wired
//! up without the engine crate needing to know about acquisition
//! pipelines or deployment tooling.

use crate::context::{JobContext, SupervisorContext};
use crate::outcome::HandlerOutcome;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait JobHandlerFn: Send + Sync {
    async fn run(&self, ctx: &JobContext) -> HandlerOutcome;
}

#[async_trait]
pub trait SupervisorHandlerFn: Send + Sync {
    async fn run(&self, ctx: &SupervisorContext) -> HandlerOutcome;
}

#[async_trait]
impl<F, Fut> JobHandlerFn for F
where
    F: Fn(JobContext) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = HandlerOutcome> + Send,
{
    async fn run(&self, ctx: &JobContext) -> HandlerOutcome {
        (self)(ctx.clone()).await
    }
}

#[async_trait]
impl<F, Fut> SupervisorHandlerFn for F
where
    F: Fn(SupervisorContext) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = HandlerOutcome> + Send,
{
    async fn run(&self, ctx: &SupervisorContext) -> HandlerOutcome {
        (self)(ctx.clone()).await
    }
}

#[derive(Default, Clone)]
pub struct JobHandlerRegistry {
    handlers: HashMap<String, Arc<dyn JobHandlerFn>>,
}

impl JobHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn JobHandlerFn>) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn JobHandlerFn>> {
        self.handlers.get(name).cloned()
    }
}

#[derive(Default, Clone)]
pub struct SupervisorHandlerRegistry {
    handlers: HashMap<String, Arc<dyn SupervisorHandlerFn>>,
}

impl SupervisorHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn SupervisorHandlerFn>) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SupervisorHandlerFn>> {
        self.handlers.get(name).cloned()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
