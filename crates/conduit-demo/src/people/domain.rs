//! Person entity

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a [`Person`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Create a new random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero id, never assigned to a stored person
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the nil id
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for PersonId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A registered person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl Person {
    /// Create a person with a fresh id
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: u32) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Replace the mutable fields
    pub fn update(&mut self, name: impl Into<String>, email: impl Into<String>, age: u32) {
        self.name = name.into();
        self.email = email.into();
        self.age = age;
    }
}
