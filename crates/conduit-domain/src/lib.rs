//! Conduit Domain Layer - Result and Error Model
//!
//! This crate contains the value types every Conduit pipeline operates on.
//! It has no async runtime and no logging dependency, so handlers, validators
//! and callers can share it freely.
//!
//! ## Architecture
//!
//! - **Error**: an immutable failure reason with a kind ([`Error`], [`ErrorKind`])
//! - **Outcome**: the tagged success/failure union returned by every dispatch ([`Outcome`])
//! - **Value Objects**: typed identifiers, sensitive-field wrapper, pagination

#![warn(missing_docs)]

pub mod error;
pub mod outcome;
pub mod value_objects;

pub use error::{CANCELLED_MESSAGE, Error, ErrorKind, FAULT_MESSAGE, FieldError, InvalidState};
pub use outcome::{Errors, Outcome};
pub use value_objects::{
    FaultId, Id, IdMarker, MASK, Page, PageInfo, PageRequest, RequestId, Sensitive,
};

/// Result type for operations that can only fail by violating an [`Outcome`] invariant
pub type DomainResult<T> = Result<T, InvalidState>;
