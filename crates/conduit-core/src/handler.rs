//! Handler contract

use async_trait::async_trait;
use conduit_domain::Outcome;

use crate::context::RequestContext;
use crate::error::Fault;
use crate::request::Request;

/// What a handler (or behavior) produces: a domain outcome, or a fault.
///
/// Domain failures belong in `Ok(Outcome::Failure(..))`. `Err(Fault)` is
/// reserved for failures the handler could not deal with; the exception
/// behavior turns those into a generic failure.
pub type HandlerResult<T> = Result<Outcome<T>, Fault>;

/// Domain logic for exactly one request type.
///
/// A mediator holds at most one handler per request type. Handlers are
/// shared across concurrent dispatches and must not keep per-call state;
/// per-call state lives in the [`RequestContext`].
#[async_trait]
pub trait Handler<R: Request>: Send + Sync {
    /// Handle `request`
    async fn handle(&self, request: &R, ctx: &RequestContext) -> HandlerResult<R::Response>;
}

#[async_trait]
impl<R, H> Handler<R> for std::sync::Arc<H>
where
    R: Request,
    H: Handler<R> + ?Sized,
{
    async fn handle(&self, request: &R, ctx: &RequestContext) -> HandlerResult<R::Response> {
        (**self).handle(request, ctx).await
    }
}
