//! Per-dispatch context handed to behaviors and handlers

use conduit_domain::RequestId;
use tokio_util::sync::CancellationToken;

use crate::notification::Notifier;

/// State scoped to exactly one dispatch.
///
/// Every call to [`Mediator::send`](crate::Mediator::send) creates a fresh
/// context, so notifications raised for one request can never leak into
/// another running concurrently.
#[derive(Debug)]
pub struct RequestContext {
    request_id: RequestId,
    notifier: Notifier,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Create a context observing `cancellation`
    pub fn new(cancellation: CancellationToken) -> Self {
        Self {
            request_id: RequestId::new(),
            notifier: Notifier::new(),
            cancellation,
        }
    }

    /// Id assigned to this dispatch
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Notifier of this dispatch
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Shorthand for `notifier().notify(..)`
    pub fn notify(&self, message: impl Into<String>) {
        self.notifier.notify(message);
    }

    /// Cancellation token of this dispatch
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Whether the caller asked to abort
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}
