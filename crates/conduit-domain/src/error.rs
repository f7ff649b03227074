//! Failure reasons carried by an [`Outcome`](crate::Outcome)

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::value_objects::FaultId;

/// Message callers see when an unexpected fault was contained by the pipeline
pub const FAULT_MESSAGE: &str = "An error occurred while processing the request.";

/// Message used for requests aborted through their cancellation token
pub const CANCELLED_MESSAGE: &str = "The request was cancelled.";

/// Programming errors around the [`Outcome`](crate::Outcome) invariants.
///
/// These are never domain failures: they signal that calling code ignored
/// `is_success` or tried to build a failure without a reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidState {
    /// The value of a failure outcome was accessed
    #[error("The value of a failure outcome can not be accessed")]
    ValueOfFailure,

    /// A failure was built from an empty error list
    #[error("A failure outcome needs at least one error")]
    EmptyErrors,

    /// `Error::NONE` was used as a failure reason
    #[error("Error::NONE can not be used as a failure reason")]
    NoneError,
}

/// Category of an [`Error`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ErrorKind {
    /// Business-rule failure reported by a handler
    Domain,
    /// A violated input rule; the handler never ran
    Validation {
        /// Name of the offending input field
        property: String,
    },
    /// A notification raised during handling and merged into the outcome
    Notification,
    /// An unexpected fault contained by the pipeline
    Fault {
        /// Reference to the logged fault
        id: FaultId,
    },
    /// The request was aborted through its cancellation token
    Cancelled,
}

/// One structured failure reason.
///
/// Errors are immutable and compared by value. [`Error::NONE`] stands for
/// "no error"; it has an empty message and is rejected as a failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Error {
    message: Cow<'static, str>,
    kind: ErrorKind,
}

impl Error {
    /// Sentinel for "no error"
    pub const NONE: Error = Error {
        message: Cow::Borrowed(""),
        kind: ErrorKind::Domain,
    };

    /// Create a domain error
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Domain,
        }
    }

    /// Create a validation error from a field-level rule violation
    pub fn validation(failure: FieldError) -> Self {
        Self {
            message: Cow::Owned(failure.to_string()),
            kind: ErrorKind::Validation {
                property: failure.property,
            },
        }
    }

    /// Create an error from a notification message
    pub fn notification(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Notification,
        }
    }

    /// Create the generic error returned for a contained fault
    pub fn fault(id: FaultId) -> Self {
        Self {
            message: Cow::Borrowed(FAULT_MESSAGE),
            kind: ErrorKind::Fault { id },
        }
    }

    /// Create the error returned for a cancelled request
    pub fn cancelled() -> Self {
        Self {
            message: Cow::Borrowed(CANCELLED_MESSAGE),
            kind: ErrorKind::Cancelled,
        }
    }

    /// Human readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Error category
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Field name for validation errors
    pub fn property(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Validation { property } => Some(property),
            _ => None,
        }
    }

    /// Fault reference for contained faults
    pub fn fault_id(&self) -> Option<FaultId> {
        match self.kind {
            ErrorKind::Fault { id } => Some(id),
            _ => None,
        }
    }

    /// Whether this is the [`Error::NONE`] sentinel (or any error without a message)
    pub fn is_none(&self) -> bool {
        self.message.is_empty()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<&'static str> for Error {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<FieldError> for Error {
    fn from(failure: FieldError) -> Self {
        Self::validation(failure)
    }
}

/// A field-level validation failure produced by a validator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending input field
    pub property: String,
    /// What is wrong with it
    pub message: String,
}

impl FieldError {
    /// Create a field error
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] - {}", self.property, self.message)
    }
}
