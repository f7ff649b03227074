//! Events raised by the people commands

use async_trait::async_trait;
use conduit::{CancellationToken, Event, EventHandler, Fault};
use tracing::info;

use super::domain::PersonId;

/// A person was stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonCreated {
    pub person_id: PersonId,
}

impl Event for PersonCreated {}

/// Writes an info line for every created person
#[derive(Debug, Default)]
pub struct LogPersonCreated;

#[async_trait]
impl EventHandler<PersonCreated> for LogPersonCreated {
    async fn handle(&self, event: &PersonCreated, _: &CancellationToken) -> Result<(), Fault> {
        info!(person_id = %event.person_id, "Person [{}] created!", event.person_id);
        Ok(())
    }
}
