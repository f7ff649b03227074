//! Person storage port and its in-memory adapter

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::domain::{Person, PersonId};

/// Storage failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Person {0} not found")]
    NotFound(PersonId),

    #[error("A person with email {0} already exists")]
    DuplicateEmail(String),
}

/// Storage port for people
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Every stored person
    async fn all(&self) -> Vec<Person>;

    /// Person with `id`, if stored
    async fn by_id(&self, id: PersonId) -> Option<Person>;

    /// People of exactly `age`
    async fn by_age(&self, age: u32) -> Vec<Person>;

    /// Whether someone already uses `email`
    async fn email_taken(&self, email: &str) -> bool;

    /// Store a new person
    async fn add(&self, person: Person) -> Result<(), RepositoryError>;

    /// Replace a stored person
    async fn update(&self, person: Person) -> Result<(), RepositoryError>;
}

/// Thread-safe in-memory repository
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    people: RwLock<HashMap<PersonId, Person>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `people`
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        Self {
            people: RwLock::new(people.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.people.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.read().is_empty()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn all(&self) -> Vec<Person> {
        self.people.read().values().cloned().collect()
    }

    async fn by_id(&self, id: PersonId) -> Option<Person> {
        self.people.read().get(&id).cloned()
    }

    async fn by_age(&self, age: u32) -> Vec<Person> {
        self.people
            .read()
            .values()
            .filter(|p| p.age == age)
            .cloned()
            .collect()
    }

    async fn email_taken(&self, email: &str) -> bool {
        self.people.read().values().any(|p| p.email == email)
    }

    async fn add(&self, person: Person) -> Result<(), RepositoryError> {
        let mut people = self.people.write();
        if people.values().any(|p| p.email == person.email) {
            return Err(RepositoryError::DuplicateEmail(person.email));
        }
        people.insert(person.id, person);
        Ok(())
    }

    async fn update(&self, person: Person) -> Result<(), RepositoryError> {
        let mut people = self.people.write();
        match people.get_mut(&person.id) {
            Some(stored) => {
                *stored = person;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(person.id)),
        }
    }
}
