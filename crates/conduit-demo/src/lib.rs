//! # Conduit Demo
//!
//! A people registry wired through the Conduit mediator, plus a handful of
//! requests that exercise the failure paths (notifications, panics, faults).

pub mod diagnostics;
pub mod people;
pub mod telemetry;

use conduit::{EventBus, FnValidator, Mediator, MediatorResult, PipelineConfig};
use std::sync::Arc;

use diagnostics::{
    DivideByZeroCommand, DivideByZeroHandler, DivideByZeroQuery, ExceptionThrownCommand,
    ExceptionThrownHandler, NotificationCommand, NotificationHandler,
};
use people::commands::{NewPersonHandler, UpdatePersonHandler};
use people::queries::{GetPeopleByAgeHandler, GetPeoplePaginatedHandler, GetPersonByIdHandler};
use people::{
    GetPeopleByAgeQuery, GetPeoplePaginatedQuery, GetPersonByIdQuery, LogPersonCreated,
    NewPersonCommand, PersonCreated, PersonRepository, UpdatePersonCommand, validators,
};

/// Errors of the demo binary
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("Mediator error: {0}")]
    Mediator(#[from] conduit::MediatorError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Event bus with the demo subscribers
pub fn event_bus() -> EventBus {
    EventBus::builder()
        .subscribe::<PersonCreated, _>(LogPersonCreated)
        .build()
}

/// Mediator with every demo handler and validator registered
pub fn mediator(
    repository: Arc<dyn PersonRepository>,
    events: EventBus,
    config: PipelineConfig,
) -> MediatorResult<Mediator> {
    Mediator::builder()
        .config(config)
        .handler::<NewPersonCommand, _>(NewPersonHandler::new(repository.clone(), events))
        .validator::<NewPersonCommand, _>(validators::new_person())
        .handler::<UpdatePersonCommand, _>(UpdatePersonHandler::new(repository.clone()))
        .validator::<UpdatePersonCommand, _>(validators::update_person())
        .handler::<GetPersonByIdQuery, _>(GetPersonByIdHandler::new(repository.clone()))
        .validator::<GetPersonByIdQuery, _>(validators::person_by_id())
        .handler::<GetPeopleByAgeQuery, _>(GetPeopleByAgeHandler::new(repository.clone()))
        .handler::<GetPeoplePaginatedQuery, _>(GetPeoplePaginatedHandler::new(repository))
        .validator::<GetPeoplePaginatedQuery, _>(validators::people_paginated())
        .handler::<NotificationCommand, _>(NotificationHandler)
        .validator::<NotificationCommand, _>(FnValidator::new(|c: &NotificationCommand| {
            if c.notification.trim().is_empty() {
                vec![conduit::FieldError::new("Notification", "must not be empty")]
            } else {
                Vec::new()
            }
        }))
        .handler::<DivideByZeroCommand, _>(DivideByZeroHandler)
        .handler::<DivideByZeroQuery, _>(DivideByZeroHandler)
        .handler::<ExceptionThrownCommand, _>(ExceptionThrownHandler)
        .build()
}
