//! Merges per-call notifications into the outcome

use async_trait::async_trait;
use conduit_domain::Error;
use tracing::debug;

use crate::context::RequestContext;
use crate::handler::HandlerResult;
use crate::pipeline::{Next, PipelineBehavior};
use crate::request::{Request, request_name};

/// Innermost behavior: after the handler returns, every notification raised
/// on the call's notifier is appended to the outcome as an error.
///
/// A successful outcome with pending notifications becomes a failure.
/// Messages already present in the outcome are not added twice. Faults pass
/// through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationBehavior;

#[async_trait]
impl<R: Request> PipelineBehavior<R> for NotificationBehavior {
    fn name(&self) -> &'static str {
        "notification"
    }

    async fn handle(
        &self,
        request: &R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> HandlerResult<R::Response> {
        let outcome = next.run(request, ctx).await?;

        let notifier = ctx.notifier();
        if notifier.is_valid() {
            return Ok(outcome);
        }

        let notifications = notifier.drain();
        let request_type = request_name::<R>();
        debug!(
            request_type,
            notifications = notifications.len(),
            "{request_type} - merging notifications"
        );
        Ok(outcome.with_additional_errors(
            notifications
                .into_iter()
                .map(|n| Error::notification(n.message().to_owned())),
        ))
    }
}
