//! Declarative field rules.
//!
//! A [`RuleSet`] is a [`Validator`] built from per-field rule lists. Rules of
//! one field run in order and stop at the first failure, so a field reports
//! at most one error; fields are independent of each other.
//!
//! ```
//! use conduit::{RuleSet, StringRules, NumberRules, Validator};
//!
//! struct NewUser {
//!     name: String,
//!     age: u32,
//! }
//!
//! let rules = RuleSet::new()
//!     .string("name", |u: &NewUser| u.name.as_str(), StringRules::new().not_empty().min_chars(2))
//!     .number("age", |u: &NewUser| u.age, NumberRules::new().at_least(18));
//!
//! let failures = rules.validate(&NewUser { name: "A".into(), age: 12 });
//! assert_eq!(failures.len(), 2);
//! ```

use std::fmt;

use conduit_domain::FieldError;

use super::Validator;

#[derive(Debug, Clone, PartialEq, Eq)]
enum StringCheck {
    NotEmpty,
    MinChars(usize),
    MaxChars(usize),
    Email,
}

impl StringCheck {
    fn check(&self, value: &str) -> Option<String> {
        match *self {
            Self::NotEmpty if value.trim().is_empty() => Some("must not be empty".to_string()),
            Self::MinChars(min) if value.chars().count() < min => {
                Some(format!("must be at least {min} characters long"))
            }
            Self::MaxChars(max) if value.chars().count() > max => {
                Some(format!("must be at most {max} characters long"))
            }
            Self::Email if !looks_like_email(value) => {
                Some("is not a valid email address".to_string())
            }
            _ => None,
        }
    }
}

/// One `@`, with something on both sides of it.
fn looks_like_email(value: &str) -> bool {
    match value.find('@') {
        Some(at) => at > 0 && at + 1 < value.len() && value.rfind('@') == Some(at),
        None => false,
    }
}

/// Ordered checks for a string field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringRules {
    checks: Vec<StringCheck>,
}

impl StringRules {
    /// Empty rule list
    pub fn new() -> Self {
        Self::default()
    }

    /// Value must contain something besides whitespace
    pub fn not_empty(mut self) -> Self {
        self.checks.push(StringCheck::NotEmpty);
        self
    }

    /// Value must have at least `min` characters
    pub fn min_chars(mut self, min: usize) -> Self {
        self.checks.push(StringCheck::MinChars(min));
        self
    }

    /// Value must have at most `max` characters
    pub fn max_chars(mut self, max: usize) -> Self {
        self.checks.push(StringCheck::MaxChars(max));
        self
    }

    /// Value must look like an e-mail address
    pub fn email(mut self) -> Self {
        self.checks.push(StringCheck::Email);
        self
    }

    fn first_failure(&self, value: &str) -> Option<String> {
        self.checks.iter().find_map(|c| c.check(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NumberCheck<N> {
    AtLeast(N),
    AtMost(N),
    Between(N, N),
}

/// Ordered checks for a numeric field
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRules<N> {
    checks: Vec<NumberCheck<N>>,
}

impl<N> Default for NumberRules<N> {
    fn default() -> Self {
        Self { checks: Vec::new() }
    }
}

impl<N: PartialOrd + fmt::Display + Copy> NumberRules<N> {
    /// Empty rule list
    pub fn new() -> Self {
        Self::default()
    }

    /// Value must be greater than or equal to `min`
    pub fn at_least(mut self, min: N) -> Self {
        self.checks.push(NumberCheck::AtLeast(min));
        self
    }

    /// Value must be less than or equal to `max`
    pub fn at_most(mut self, max: N) -> Self {
        self.checks.push(NumberCheck::AtMost(max));
        self
    }

    /// Value must lie in `min..=max`
    pub fn between(mut self, min: N, max: N) -> Self {
        self.checks.push(NumberCheck::Between(min, max));
        self
    }

    fn first_failure(&self, value: N) -> Option<String> {
        self.checks.iter().find_map(|check| match *check {
            NumberCheck::AtLeast(min) if value < min => {
                Some(format!("must be greater than or equal to {min}"))
            }
            NumberCheck::AtMost(max) if value > max => {
                Some(format!("must be less than or equal to {max}"))
            }
            NumberCheck::Between(min, max) if value < min || value > max => {
                Some(format!("must be between {min} and {max}"))
            }
            _ => None,
        })
    }
}

type FieldCheck<R> = Box<dyn Fn(&R) -> Option<FieldError> + Send + Sync>;

/// A [`Validator`] assembled from per-field rules
pub struct RuleSet<R> {
    fields: Vec<FieldCheck<R>>,
}

impl<R: 'static> RuleSet<R> {
    /// Rule set without fields
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add rules for a string field
    pub fn string<F>(mut self, property: &'static str, accessor: F, rules: StringRules) -> Self
    where
        F: Fn(&R) -> &str + Send + Sync + 'static,
    {
        self.fields.push(Box::new(move |request: &R| {
            rules
                .first_failure(accessor(request))
                .map(|message| FieldError::new(property, message))
        }));
        self
    }

    /// Add rules for a numeric field
    pub fn number<N, F>(mut self, property: &'static str, accessor: F, rules: NumberRules<N>) -> Self
    where
        N: PartialOrd + fmt::Display + Copy + Send + Sync + 'static,
        F: Fn(&R) -> N + Send + Sync + 'static,
    {
        self.fields.push(Box::new(move |request: &R| {
            rules
                .first_failure(accessor(request))
                .map(|message| FieldError::new(property, message))
        }));
        self
    }

    /// Add a free-form predicate; `message` is reported when it returns false
    pub fn must<F>(mut self, property: &'static str, predicate: F, message: &'static str) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.fields.push(Box::new(move |request: &R| {
            (!predicate(request)).then(|| FieldError::new(property, message))
        }));
        self
    }

    /// Number of configured fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is configured
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R: 'static> Default for RuleSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Validator<R> for RuleSet<R> {
    fn validate(&self, request: &R) -> Vec<FieldError> {
        self.fields.iter().filter_map(|check| check(request)).collect()
    }
}

impl<R> fmt::Debug for RuleSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("fields", &self.fields.len())
            .finish()
    }
}
