//! # Conduit
//!
//! Typed command/query mediator. A caller submits a request value and gets
//! back an [`Outcome`]; every dispatch runs through the same fixed chain of
//! behaviors before reaching its single handler:
//!
//! 1. [`ExceptionBehavior`] - turns panics and faults into a generic failure
//! 2. [`LoggingBehavior`] - entry/exit logs with masked input
//! 3. [`ValidationBehavior`] - runs every registered validator, short-circuits on errors
//! 4. [`NotificationBehavior`] - merges per-call notifications into the outcome
//! 5. [`Handler`] - the domain logic
//!
//! ```
//! use async_trait::async_trait;
//! use conduit::{Handler, HandlerResult, Mediator, Outcome, Request, RequestContext, RequestKind};
//!
//! #[derive(Debug)]
//! struct Ping;
//!
//! impl Request for Ping {
//!     type Response = &'static str;
//!     const KIND: RequestKind = RequestKind::Query;
//! }
//!
//! struct PingHandler;
//!
//! #[async_trait]
//! impl Handler<Ping> for PingHandler {
//!     async fn handle(&self, _: &Ping, _: &RequestContext) -> HandlerResult<&'static str> {
//!         Ok(Outcome::success("pong"))
//!     }
//! }
//!
//! # futures::executor::block_on(async {
//! let mediator = Mediator::builder().handler::<Ping, _>(PingHandler).build().unwrap();
//! let outcome = mediator.send(Ping).await.unwrap();
//! assert_eq!(outcome.value(), Ok(&"pong"));
//! # });
//! ```

#![warn(rust_2018_idioms)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod handler;
pub mod mediator;
pub mod notification;
pub mod pipeline;
pub mod request;
pub mod validation;

pub use conduit_domain::{
    CANCELLED_MESSAGE, Error, ErrorKind, Errors, FAULT_MESSAGE, FaultId, FieldError, InvalidState,
    MASK, Outcome, Page, PageInfo, PageRequest, RequestId, Sensitive,
};

pub use config::PipelineConfig;
pub use context::RequestContext;
pub use error::{BoxError, Fault, MediatorError, MediatorResult};
pub use events::{Event, EventBus, EventBusBuilder, EventHandler};
pub use handler::{Handler, HandlerResult};
pub use mediator::{Mediator, MediatorBuilder};
pub use notification::{Notification, Notifier};
pub use pipeline::{
    Next, Pipeline, PipelineBehavior,
    behaviors::{ExceptionBehavior, LoggingBehavior, NotificationBehavior, ValidationBehavior},
};
pub use request::{Request, RequestKind, request_name};
pub use validation::{
    FnValidator, Validator,
    rules::{NumberRules, RuleSet, StringRules},
};

/// Re-export tokio-util's cancellation token used by [`RequestContext`]
pub use tokio_util::sync::CancellationToken;

/// Re-export commonly used types
pub mod prelude {
    pub use super::{
        CancellationToken, Error, Fault, FieldError, Handler, HandlerResult, Mediator,
        MediatorError, Outcome, PipelineConfig, Request, RequestContext, RequestKind, RuleSet,
        NumberRules, Sensitive, StringRules, Validator,
    };
}
