//! People registry: a small CRUD domain driven through the mediator

pub mod commands;
pub mod domain;
pub mod events;
pub mod queries;
pub mod repository;
pub mod validators;

pub use commands::{NewPersonCommand, UpdatePersonCommand};
pub use domain::{Person, PersonId};
pub use events::{LogPersonCreated, PersonCreated};
pub use queries::{GetPeopleByAgeQuery, GetPeoplePaginatedQuery, GetPersonByIdQuery};
pub use repository::{InMemoryPersonRepository, PersonRepository, RepositoryError};
