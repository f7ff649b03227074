//! Correlation identifiers
//!
//! Random v4 UUIDs tagged with a marker type, so a fault id can never be
//! passed where a request id is expected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

mod private {
    pub trait Sealed {}
}

/// Tag distinguishing one kind of identifier from another. Sealed.
pub trait IdMarker: private::Sealed + Send + Sync + 'static {
    /// Label used by `Debug`
    const LABEL: &'static str;
}

/// Tag for [`FaultId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaultMarker;

/// Tag for [`RequestId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestMarker;

impl private::Sealed for FaultMarker {}
impl private::Sealed for RequestMarker {}

impl IdMarker for FaultMarker {
    const LABEL: &'static str = "FaultId";
}

impl IdMarker for RequestMarker {
    const LABEL: &'static str = "RequestId";
}

/// Random identifier tagged with `T`.
///
/// A [`FaultId`] is what a caller gets instead of the fault text: the same id
/// is written to the error log, so operators can correlate a generic failure
/// with its diagnostics.
///
/// ```compile_fail
/// # use conduit_domain::value_objects::{FaultId, RequestId};
/// let request_id: RequestId = FaultId::new();
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T: IdMarker>(Uuid, PhantomData<T>);

impl<T: IdMarker> Id<T> {
    /// Fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4(), PhantomData)
    }
}

impl<T: IdMarker> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", T::LABEL, self.0)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(|uuid| Self(uuid, PhantomData))
    }
}

/// Identifier of a contained fault, shared between the failed outcome and the error log
pub type FaultId = Id<FaultMarker>;

/// Identifier of a single dispatch, attached to the dispatch tracing span
pub type RequestId = Id<RequestMarker>;
