//! Property-based tests for the outcome invariants
//!
//! Whatever path builds an `Outcome`, `is_success` must agree with an empty
//! error list and the value must be reachable only on success.

use conduit_domain::{Error, FieldError, InvalidState, Outcome};
use proptest::prelude::*;

fn message() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,24}"
}

fn error() -> impl Strategy<Value = Error> {
    prop_oneof![
        message().prop_map(Error::new),
        message().prop_map(Error::notification),
        (message(), message()).prop_map(|(p, m)| Error::validation(FieldError::new(p, m))),
    ]
}

fn assert_invariant<T: std::fmt::Debug>(outcome: &Outcome<T>) -> Result<(), TestCaseError> {
    prop_assert_eq!(outcome.is_success(), outcome.errors().is_empty());
    prop_assert_eq!(outcome.is_success(), outcome.value().is_ok());
    prop_assert!(outcome.errors().iter().all(|e| !e.is_none()));
    Ok(())
}

proptest! {
    /// Success always carries its value and no errors
    #[test]
    fn success_keeps_value(value in any::<i64>()) {
        let outcome = Outcome::success(value);
        assert_invariant(&outcome)?;
        prop_assert_eq!(outcome.value(), Ok(&value));
    }

    /// Failures built from a non-empty list keep every error in order
    #[test]
    fn with_errors_preserves_order(errors in prop::collection::vec(error(), 1..8)) {
        let outcome = Outcome::<u8>::with_errors(errors.clone()).unwrap();
        assert_invariant(&outcome)?;
        prop_assert_eq!(outcome.errors(), errors.as_slice());
        prop_assert_eq!(outcome.value(), Err(InvalidState::ValueOfFailure));
    }

    /// Merging additional errors never produces a success with errors
    #[test]
    fn additional_errors_keep_invariant(
        start_success in any::<bool>(),
        additions in prop::collection::vec(error(), 0..6),
    ) {
        let start: Outcome<u8> = if start_success {
            Outcome::success(1)
        } else {
            Outcome::with_error(Error::new("initial"))
        };
        let merged = start.with_additional_errors(additions.clone());
        assert_invariant(&merged)?;

        if start_success && additions.is_empty() {
            prop_assert!(merged.is_success());
        }
        if !additions.is_empty() {
            prop_assert!(merged.is_failure());
        }
    }

    /// Merged error messages are unique
    #[test]
    fn additional_errors_are_deduplicated(additions in prop::collection::vec(message(), 1..10)) {
        let merged = Outcome::success(())
            .with_additional_errors(additions.iter().cloned().map(Error::notification));

        let messages: Vec<&str> = merged.errors().iter().map(Error::message).collect();
        let mut unique = messages.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(messages.len(), unique.len());
    }
}

#[test]
fn empty_failure_fails_fast() {
    assert_eq!(
        Outcome::<()>::with_errors(std::iter::empty()),
        Err(InvalidState::EmptyErrors)
    );
}
