//! State-changing people requests

use async_trait::async_trait;
use conduit::{
    Error, EventBus, Fault, Handler, HandlerResult, Outcome, Request, RequestContext, RequestKind,
    Sensitive,
};
use std::sync::Arc;
use tracing::warn;

use super::domain::{Person, PersonId};
use super::events::PersonCreated;
use super::repository::{PersonRepository, RepositoryError};

pub const DUPLICATE_EMAIL: &str = "Person with the same email already added!";
pub const PERSON_NOT_FOUND: &str = "Person not found!";

/// Register a new person
#[derive(Debug, Clone)]
pub struct NewPersonCommand {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub password: Sensitive<String>,
}

impl Request for NewPersonCommand {
    type Response = PersonId;
    const KIND: RequestKind = RequestKind::Command;
}

/// Change the data of a stored person
#[derive(Debug, Clone)]
pub struct UpdatePersonCommand {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl Request for UpdatePersonCommand {
    type Response = ();
    const KIND: RequestKind = RequestKind::Command;
}

fn duplicate_email<T>(ctx: &RequestContext) -> Outcome<T> {
    ctx.notify(DUPLICATE_EMAIL);
    Outcome::with_error(Error::notification(DUPLICATE_EMAIL))
}

pub struct NewPersonHandler {
    repository: Arc<dyn PersonRepository>,
    events: EventBus,
}

impl NewPersonHandler {
    pub fn new(repository: Arc<dyn PersonRepository>, events: EventBus) -> Self {
        Self { repository, events }
    }
}

#[async_trait]
impl Handler<NewPersonCommand> for NewPersonHandler {
    async fn handle(
        &self,
        request: &NewPersonCommand,
        ctx: &RequestContext,
    ) -> HandlerResult<PersonId> {
        if self.repository.email_taken(&request.email).await {
            return Ok(duplicate_email(ctx));
        }

        let person = Person::new(&request.name, &request.email, request.age);
        let person_id = person.id;
        // A concurrent sign-up may claim the address between the check and the insert
        match self.repository.add(person).await {
            Ok(()) => {}
            Err(RepositoryError::DuplicateEmail(_)) => return Ok(duplicate_email(ctx)),
            Err(other) => return Err(Fault::from_error(other)),
        }

        let published = self
            .events
            .publish_with_cancellation(&PersonCreated { person_id }, ctx.cancellation())
            .await;
        if published.is_failure() {
            warn!(%person_id, errors = published.errors().len(), "PersonCreated subscribers failed");
        }

        Ok(Outcome::success(person_id))
    }
}

pub struct UpdatePersonHandler {
    repository: Arc<dyn PersonRepository>,
}

impl UpdatePersonHandler {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Handler<UpdatePersonCommand> for UpdatePersonHandler {
    async fn handle(&self, request: &UpdatePersonCommand, ctx: &RequestContext) -> HandlerResult<()> {
        let Some(mut person) = self.repository.by_id(request.id).await else {
            ctx.notify(PERSON_NOT_FOUND);
            return Ok(Outcome::unit());
        };

        person.update(&request.name, &request.email, request.age);
        self.repository
            .update(person)
            .await
            .map_err(Fault::from_error)?;

        Ok(Outcome::unit())
    }
}
