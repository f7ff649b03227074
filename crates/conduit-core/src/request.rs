//! Request contract

use std::fmt;

/// Whether a request changes state or only reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Intent to change state
    Command,
    /// Side-effect-free read
    Query,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => f.write_str("command"),
            Self::Query => f.write_str("query"),
        }
    }
}

/// A command or query the mediator can dispatch.
///
/// The `Debug` output of a request is what the pipeline logs, so fields that
/// must not reach the logs should be wrapped in
/// [`Sensitive`](crate::Sensitive).
pub trait Request: fmt::Debug + Send + Sync + 'static {
    /// Payload of a successful outcome
    type Response: Send + 'static;

    /// Command or query
    const KIND: RequestKind;
}

/// Short type name of a request, used in logs and errors.
///
/// Module paths are stripped, generic arguments are kept as written:
/// `app::people::NewPerson` becomes `NewPerson`.
pub fn request_name<R: ?Sized>() -> &'static str {
    let full = std::any::type_name::<R>();
    let base_end = full.find('<').unwrap_or(full.len());
    let start = full[..base_end].rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}
