//! Sensitive input fields
//!
//! Request types are logged through their `Debug` representation by the
//! pipeline. Wrapping a field in [`Sensitive`] marks it so that every
//! rendering of the request (`Debug`, `Display`, `Serialize`) shows [`MASK`]
//! instead of the value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder written wherever a sensitive value would appear
pub const MASK: &str = "*";

/// Marks a request field as sensitive.
///
/// # Examples
///
/// ```
/// use conduit_domain::{MASK, Sensitive};
///
/// #[derive(Debug)]
/// struct Login {
///     email: String,
///     password: Sensitive<String>,
/// }
///
/// let login = Login {
///     email: "test@gmail.com".to_string(),
///     password: Sensitive::new("testPassword".to_string()),
/// };
///
/// let rendered = format!("{login:?}");
/// assert!(rendered.contains(MASK));
/// assert!(!rendered.contains("testPassword"));
/// assert_eq!(login.password.expose(), "testPassword");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Unwrap the value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(MASK)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Credentials {
        email: String,
        password: Sensitive<String>,
    }

    #[test]
    fn test_debug_and_display_are_masked() {
        let secret = Sensitive::new("secret123".to_string());
        assert_eq!(format!("{secret:?}"), MASK);
        assert_eq!(secret.to_string(), MASK);
    }

    #[test]
    fn test_serialize_is_masked_but_deserialize_is_transparent() {
        let parsed: Credentials =
            serde_json::from_str(r#"{"email":"a@b.io","password":"secret123"}"#).unwrap();
        assert_eq!(parsed.password.expose(), "secret123");

        let json = serde_json::to_string(&parsed).unwrap();
        assert!(!json.contains("secret123"));
        assert!(json.contains(r#""password":"*""#));
    }

    #[test]
    fn test_other_fields_are_left_alone() {
        let credentials = Credentials {
            email: "test@gmail.com".to_string(),
            password: "testPassword".to_string().into(),
        };

        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("test@gmail.com"));
        assert!(!rendered.contains("testPassword"));
    }
}
