//! Request validation
//!
//! A request type may have any number of validators. The validation
//! behavior runs all of them in registration order and concatenates their
//! failures; the handler only runs when the combined list is empty.

pub mod rules;

use std::marker::PhantomData;

use conduit_domain::FieldError;

/// Checks a request and reports field-level failures.
///
/// Validators are pure: they must not have side effects, and an empty list
/// means the request is valid.
pub trait Validator<R>: Send + Sync {
    /// Validate `request`
    fn validate(&self, request: &R) -> Vec<FieldError>;
}

/// Adapter turning a closure into a [`Validator`]
pub struct FnValidator<R, F> {
    check: F,
    _request: PhantomData<fn(&R)>,
}

impl<R, F> FnValidator<R, F>
where
    F: Fn(&R) -> Vec<FieldError> + Send + Sync,
{
    /// Wrap `check`
    pub fn new(check: F) -> Self {
        Self {
            check,
            _request: PhantomData,
        }
    }
}

impl<R, F> Validator<R> for FnValidator<R, F>
where
    F: Fn(&R) -> Vec<FieldError> + Send + Sync,
{
    fn validate(&self, request: &R) -> Vec<FieldError> {
        (self.check)(request)
    }
}

impl<R, F> std::fmt::Debug for FnValidator<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}
