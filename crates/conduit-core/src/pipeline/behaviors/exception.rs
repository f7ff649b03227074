//! Outermost behavior: contains faults and panics

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use conduit_domain::{Error, FaultId, Outcome};
use futures::FutureExt;
use tracing::{error, info};

use crate::context::RequestContext;
use crate::error::Fault;
use crate::handler::HandlerResult;
use crate::pipeline::{Next, PipelineBehavior};
use crate::request::{Request, request_name};

/// Turns any fault raised further in into a generic failure.
///
/// The fault, its [`FaultId`] and the masked request input go to the error
/// log; the caller only gets [`Error::fault`] carrying the same id. A fault
/// reporting cancellation becomes [`Error::cancelled`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExceptionBehavior;

#[async_trait]
impl<R: Request> PipelineBehavior<R> for ExceptionBehavior {
    fn name(&self) -> &'static str {
        "exception"
    }

    async fn handle(
        &self,
        request: &R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> HandlerResult<R::Response> {
        let fault = match AssertUnwindSafe(next.run(request, ctx)).catch_unwind().await {
            Ok(Ok(outcome)) => return Ok(outcome),
            Ok(Err(fault)) => fault,
            Err(payload) => Fault::from_panic(payload),
        };

        let request_type = request_name::<R>();
        if fault.is_cancelled() {
            info!(request_type, request_id = %ctx.request_id(), "{request_type} - cancelled");
            return Ok(Outcome::cancelled());
        }

        let fault_id = FaultId::new();
        error!(
            request_type,
            request_id = %ctx.request_id(),
            %fault_id,
            input = ?request,
            error = %fault,
            "{request_type} - exception captured"
        );
        Ok(Outcome::with_error(Error::fault(fault_id)))
    }
}
