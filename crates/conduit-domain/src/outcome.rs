//! The success/failure union returned by every dispatched request

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::ops::Deref;

use crate::{
    DomainResult,
    error::{Error, InvalidState},
};

/// Non-empty, ordered list of errors carried by a failure.
///
/// The only ways to build one reject an empty list and [`Error::NONE`], so a
/// failure [`Outcome`] always explains itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Errors(Vec<Error>);

impl Errors {
    /// Build from an error list
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::EmptyErrors`] for an empty list and
    /// [`InvalidState::NoneError`] if any entry is [`Error::NONE`].
    pub fn new(errors: Vec<Error>) -> DomainResult<Self> {
        if errors.is_empty() {
            return Err(InvalidState::EmptyErrors);
        }
        if errors.iter().any(Error::is_none) {
            return Err(InvalidState::NoneError);
        }
        Ok(Self(errors))
    }

    /// Build from a single error
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::NoneError`] for [`Error::NONE`].
    pub fn single(error: Error) -> DomainResult<Self> {
        Self::new(vec![error])
    }

    /// Whether an error with exactly this message is already present
    pub fn contains_message(&self, message: &str) -> bool {
        self.0.iter().any(|error| error.message() == message)
    }

    /// First error; always present
    pub fn first(&self) -> &Error {
        &self.0[0]
    }

    /// Consume into the underlying vector
    pub fn into_vec(self) -> Vec<Error> {
        self.0
    }

    /// Append errors whose message is not already present, skipping `Error::NONE`
    fn extend_distinct(&mut self, additions: impl IntoIterator<Item = Error>) {
        for error in additions {
            if !error.is_none() && !self.contains_message(error.message()) {
                self.0.push(error);
            }
        }
    }
}

impl Deref for Errors {
    type Target = [Error];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Errors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Outcome of a dispatched command or query.
///
/// `Outcome<()>` is the plain success/failure case; any other `T` is the
/// success payload. The payload is only reachable through the `Success`
/// arm, so a failure can never leak an unset value.
///
/// # Examples
///
/// ```
/// use conduit_domain::{Error, Outcome};
///
/// let created: Outcome<u32> = Outcome::success(7);
/// assert!(created.is_success());
/// assert!(created.errors().is_empty());
///
/// let rejected: Outcome<u32> = Error::new("Person not found").into();
/// assert!(rejected.is_failure());
/// assert!(rejected.value().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T = ()> {
    /// Completed successfully with a value
    Success(T),
    /// Failed with one or more errors
    Failure(Errors),
}

impl Outcome<()> {
    /// Successful outcome without a payload
    pub fn unit() -> Self {
        Self::Success(())
    }
}

impl<T> Outcome<T> {
    /// Successful outcome carrying `value`
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Failed outcome with a single error.
    ///
    /// `Error::NONE` is not a failure reason. Debug builds panic on it;
    /// release builds replace it with a generic domain error.
    pub fn with_error(error: Error) -> Self {
        debug_assert!(!error.is_none(), "Error::NONE can not be used as a failure reason");
        let error = if error.is_none() {
            Error::new("Unknown error")
        } else {
            error
        };
        Self::Failure(Errors(vec![error]))
    }

    /// Failed outcome with several errors
    ///
    /// # Errors
    ///
    /// Fails fast with [`InvalidState`] when `errors` is empty or contains
    /// [`Error::NONE`].
    pub fn with_errors(errors: impl IntoIterator<Item = Error>) -> DomainResult<Self> {
        Errors::new(errors.into_iter().collect()).map(Self::Failure)
    }

    /// Failed outcome for a cancelled request
    pub fn cancelled() -> Self {
        Self::with_error(Error::cancelled())
    }

    /// Whether the outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the outcome is a failure
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Errors of the outcome; empty iff it is a success
    pub fn errors(&self) -> &[Error] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(errors) => &errors.0,
        }
    }

    /// Borrow the success value
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::ValueOfFailure`] on a failure.
    pub fn value(&self) -> DomainResult<&T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(_) => Err(InvalidState::ValueOfFailure),
        }
    }

    /// Take the success value
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::ValueOfFailure`] on a failure.
    pub fn into_value(self) -> DomainResult<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(_) => Err(InvalidState::ValueOfFailure),
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<T, Errors> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(errors) => Err(errors),
        }
    }

    /// Map the success value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(errors) => Outcome::Failure(errors),
        }
    }

    /// Chain another fallible step on success
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(errors) => Outcome::Failure(errors),
        }
    }

    /// Build a new outcome that also carries `additions`.
    ///
    /// A success with at least one addition becomes a failure (its value is
    /// dropped); a failure gets the additions appended. Additions whose
    /// message is already present, and `Error::NONE`, are skipped. With no
    /// effective additions the outcome is returned unchanged.
    pub fn with_additional_errors(self, additions: impl IntoIterator<Item = Error>) -> Self {
        match self {
            Self::Success(value) => {
                let mut collected: Vec<Error> = Vec::new();
                for error in additions {
                    if !error.is_none() && !collected.iter().any(|e| e.message() == error.message())
                    {
                        collected.push(error);
                    }
                }
                if collected.is_empty() {
                    Self::Success(value)
                } else {
                    Self::Failure(Errors(collected))
                }
            }
            Self::Failure(mut errors) => {
                errors.extend_distinct(additions);
                Self::Failure(errors)
            }
        }
    }
}

impl<T> From<Error> for Outcome<T> {
    fn from(error: Error) -> Self {
        Self::with_error(error)
    }
}

impl<T> From<Errors> for Outcome<T> {
    fn from(errors: Errors) -> Self {
        Self::Failure(errors)
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(value) => {
                let mut state = serializer.serialize_struct("Outcome", 3)?;
                state.serialize_field("isSuccess", &true)?;
                state.serialize_field("value", value)?;
                state.serialize_field("errors", &[] as &[Error])?;
                state.end()
            }
            Self::Failure(errors) => {
                let mut state = serializer.serialize_struct("Outcome", 2)?;
                state.serialize_field("isSuccess", &false)?;
                state.serialize_field("errors", errors)?;
                state.end()
            }
        }
    }
}
