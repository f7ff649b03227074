//! Entry/exit logging

use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use crate::context::RequestContext;
use crate::handler::HandlerResult;
use crate::pipeline::{Next, PipelineBehavior};
use crate::request::{Request, request_name};

/// Logs every request on the way in and its outcome on the way out.
///
/// The input is logged through its `Debug` output, so
/// [`Sensitive`](crate::Sensitive) fields show up masked. Never fails on its
/// own.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBehavior;

#[async_trait]
impl<R: Request> PipelineBehavior<R> for LoggingBehavior {
    fn name(&self) -> &'static str {
        "logging"
    }

    async fn handle(
        &self,
        request: &R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> HandlerResult<R::Response> {
        let request_type = request_name::<R>();
        debug!(
            request_type,
            kind = %R::KIND,
            input = ?request,
            "{request_type} - entering handler"
        );

        let started = Instant::now();
        let result = next.run(request, ctx).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(outcome) => debug!(
                request_type,
                success = outcome.is_success(),
                errors = outcome.errors().len(),
                elapsed_ms,
                "{request_type} - leaving handler"
            ),
            Err(fault) => debug!(
                request_type,
                error = %fault,
                elapsed_ms,
                "{request_type} - leaving handler with a fault"
            ),
        }
        result
    }
}
