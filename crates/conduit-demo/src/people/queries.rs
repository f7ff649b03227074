//! Read-only people requests

use async_trait::async_trait;
use conduit::{
    Handler, HandlerResult, Outcome, Page, PageRequest, Request, RequestContext, RequestKind,
};
use std::sync::Arc;

use super::domain::{Person, PersonId};
use super::repository::PersonRepository;

/// Look up one person; succeeds with `None` when nobody has the id
#[derive(Debug, Clone, Copy)]
pub struct GetPersonByIdQuery {
    pub id: PersonId,
}

impl Request for GetPersonByIdQuery {
    type Response = Option<Person>;
    const KIND: RequestKind = RequestKind::Query;
}

/// Everyone of exactly `age`, ordered by name
#[derive(Debug, Clone, Copy)]
pub struct GetPeopleByAgeQuery {
    pub age: u32,
}

impl Request for GetPeopleByAgeQuery {
    type Response = Vec<Person>;
    const KIND: RequestKind = RequestKind::Query;
}

/// One page of people ordered by name, optionally filtered
#[derive(Debug, Clone)]
pub struct GetPeoplePaginatedQuery {
    pub page: PageRequest,
    /// Keep people whose name contains this text
    pub name: Option<String>,
    /// Keep people of exactly this age
    pub age: Option<u32>,
}

impl Request for GetPeoplePaginatedQuery {
    type Response = Page<Person>;
    const KIND: RequestKind = RequestKind::Query;
}

pub struct GetPersonByIdHandler {
    repository: Arc<dyn PersonRepository>,
}

impl GetPersonByIdHandler {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Handler<GetPersonByIdQuery> for GetPersonByIdHandler {
    async fn handle(
        &self,
        request: &GetPersonByIdQuery,
        _: &RequestContext,
    ) -> HandlerResult<Option<Person>> {
        Ok(Outcome::success(self.repository.by_id(request.id).await))
    }
}

pub struct GetPeopleByAgeHandler {
    repository: Arc<dyn PersonRepository>,
}

impl GetPeopleByAgeHandler {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Handler<GetPeopleByAgeQuery> for GetPeopleByAgeHandler {
    async fn handle(
        &self,
        request: &GetPeopleByAgeQuery,
        _: &RequestContext,
    ) -> HandlerResult<Vec<Person>> {
        let mut people = self.repository.by_age(request.age).await;
        people.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Outcome::success(people))
    }
}

pub struct GetPeoplePaginatedHandler {
    repository: Arc<dyn PersonRepository>,
}

impl GetPeoplePaginatedHandler {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Handler<GetPeoplePaginatedQuery> for GetPeoplePaginatedHandler {
    async fn handle(
        &self,
        request: &GetPeoplePaginatedQuery,
        _: &RequestContext,
    ) -> HandlerResult<Page<Person>> {
        let name = request.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let mut people: Vec<Person> = self
            .repository
            .all()
            .await
            .into_iter()
            .filter(|p| name.is_none_or(|n| p.name.contains(n)))
            .filter(|p| request.age.is_none_or(|age| p.age == age))
            .collect();
        people.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Outcome::success(Page::from_slice(&people, request.page)))
    }
}
