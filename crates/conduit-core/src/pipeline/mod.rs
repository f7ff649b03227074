//! Behavior chain wrapped around a handler.
//!
//! Each behavior receives the request, the per-call context and a [`Next`]
//! continuation. Calling [`Next::run`] invokes the rest of the chain; not
//! calling it short-circuits the handler. `Next` is consumed on use, so the
//! inner chain runs at most once per behavior.

pub mod behaviors;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::context::RequestContext;
use crate::handler::{Handler, HandlerResult};
use crate::request::Request;

/// Cross-cutting step executed around a handler
#[async_trait]
pub trait PipelineBehavior<R: Request>: Send + Sync {
    /// Name used in logs and diagnostics
    fn name(&self) -> &'static str;

    /// Run this step, delegating inward through `next`
    async fn handle(
        &self,
        request: &R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> HandlerResult<R::Response>;
}

/// Continuation into the remaining behaviors and the handler
pub struct Next<'a, R: Request> {
    behaviors: &'a [Arc<dyn PipelineBehavior<R>>],
    handler: &'a dyn Handler<R>,
}

impl<'a, R: Request> Next<'a, R> {
    /// Invoke the rest of the chain
    pub fn run(self, request: &'a R, ctx: &'a RequestContext) -> BoxFuture<'a, HandlerResult<R::Response>> {
        match self.behaviors.split_first() {
            Some((behavior, rest)) => behavior.handle(
                request,
                ctx,
                Next {
                    behaviors: rest,
                    handler: self.handler,
                },
            ),
            None => self.handler.handle(request, ctx),
        }
    }
}

impl<R: Request> std::fmt::Debug for Next<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.behaviors.len())
            .finish_non_exhaustive()
    }
}

/// A handler together with its behaviors, outermost first
pub struct Pipeline<R: Request> {
    behaviors: Vec<Arc<dyn PipelineBehavior<R>>>,
    handler: Arc<dyn Handler<R>>,
}

impl<R: Request> Pipeline<R> {
    /// Pipeline that calls `handler` directly
    pub fn new(handler: Arc<dyn Handler<R>>) -> Self {
        Self {
            behaviors: Vec::new(),
            handler,
        }
    }

    /// Append a behavior inside the ones already added
    pub fn with_behavior(mut self, behavior: Arc<dyn PipelineBehavior<R>>) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Behavior names, outermost first
    pub fn behavior_names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|b| b.name()).collect()
    }

    /// Run `request` through every behavior and the handler
    pub async fn execute(&self, request: &R, ctx: &RequestContext) -> HandlerResult<R::Response> {
        Next {
            behaviors: &self.behaviors,
            handler: self.handler.as_ref(),
        }
        .run(request, ctx)
        .await
    }
}

impl<R: Request> std::fmt::Debug for Pipeline<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("behaviors", &self.behavior_names())
            .finish_non_exhaustive()
    }
}
