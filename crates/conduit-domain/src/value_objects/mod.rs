//! Domain Value Objects
//!
//! Immutable objects that represent concepts in the domain
//! with no conceptual identity, only defined by their attributes.

mod id;
mod pagination;
mod sensitive;

pub use id::{FaultId, FaultMarker, Id, IdMarker, RequestId, RequestMarker};
pub use pagination::{Page, PageInfo, PageRequest};
pub use sensitive::{MASK, Sensitive};
