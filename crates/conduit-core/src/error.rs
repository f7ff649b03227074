//! Error types for the mediator

use std::any::Any;

use thiserror::Error;

/// Boxed error carried by [`Fault::Error`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An unexpected failure raised while handling a request.
///
/// Faults are not domain failures: handlers report those through a failed
/// [`Outcome`](crate::Outcome). A fault is what a handler (or a behavior)
/// could not deal with, including a panic. The exception behavior contains
/// faults; callers only ever see the generic fault error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Fault {
    /// The handler panicked
    #[error("panic: {0}")]
    Panic(String),

    /// A plain fault message
    #[error("{0}")]
    Message(String),

    /// An underlying error the handler could not recover from
    #[error("{0}")]
    Error(#[source] BoxError),

    /// The handler observed cancellation and gave up
    #[error("request cancelled")]
    Cancelled,
}

impl Fault {
    /// Fault from a plain message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Fault wrapping any error
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Error(Box::new(error))
    }

    /// Fault from a caught panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "non-string panic payload".to_string(),
            },
        };
        Self::Panic(message)
    }

    /// Whether the fault stands for an observed cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Errors surfaced by [`Mediator`](crate::Mediator) itself rather than by a handler
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MediatorError {
    /// No handler was registered for the request type
    #[error("No handler registered for request type {0}")]
    HandlerNotRegistered(&'static str),

    /// A second handler was registered for the same request type
    #[error("A handler is already registered for request type {0}")]
    DuplicateHandler(&'static str),

    /// Validators were registered for a request type that has no handler
    #[error("Validators registered for request type {0} which has no handler")]
    ValidatorWithoutHandler(&'static str),

    /// A fault escaped the pipeline because the exception behavior is disabled
    #[error("Unhandled fault: {0}")]
    Unhandled(#[from] Fault),
}

/// Result type for mediator operations
pub type MediatorResult<T> = Result<T, MediatorError>;
