//! Requests that exercise the failure paths of the pipeline

use async_trait::async_trait;
use conduit::{Fault, Handler, HandlerResult, Outcome, Request, RequestContext, RequestKind};
use std::hint::black_box;

/// Raises `notification` and otherwise succeeds
#[derive(Debug, Clone)]
pub struct NotificationCommand {
    pub notification: String,
}

impl Request for NotificationCommand {
    type Response = ();
    const KIND: RequestKind = RequestKind::Command;
}

/// Panics with an integer division by zero
#[derive(Debug, Clone, Copy)]
pub struct DivideByZeroCommand;

impl Request for DivideByZeroCommand {
    type Response = ();
    const KIND: RequestKind = RequestKind::Command;
}

/// Returns a fault instead of an outcome
#[derive(Debug, Clone, Copy)]
pub struct ExceptionThrownCommand;

impl Request for ExceptionThrownCommand {
    type Response = ();
    const KIND: RequestKind = RequestKind::Command;
}

/// Query variant of [`DivideByZeroCommand`]
#[derive(Debug, Clone, Copy)]
pub struct DivideByZeroQuery;

impl Request for DivideByZeroQuery {
    type Response = i32;
    const KIND: RequestKind = RequestKind::Query;
}

fn divide_by_zero() -> i32 {
    420 / black_box(0)
}

pub struct NotificationHandler;

#[async_trait]
impl Handler<NotificationCommand> for NotificationHandler {
    async fn handle(&self, request: &NotificationCommand, ctx: &RequestContext) -> HandlerResult<()> {
        ctx.notify(request.notification.clone());
        Ok(Outcome::unit())
    }
}

pub struct DivideByZeroHandler;

#[async_trait]
impl Handler<DivideByZeroCommand> for DivideByZeroHandler {
    async fn handle(&self, _: &DivideByZeroCommand, _: &RequestContext) -> HandlerResult<()> {
        divide_by_zero();
        Ok(Outcome::unit())
    }
}

#[async_trait]
impl Handler<DivideByZeroQuery> for DivideByZeroHandler {
    async fn handle(&self, _: &DivideByZeroQuery, _: &RequestContext) -> HandlerResult<i32> {
        Ok(Outcome::success(divide_by_zero()))
    }
}

pub struct ExceptionThrownHandler;

#[async_trait]
impl Handler<ExceptionThrownCommand> for ExceptionThrownHandler {
    async fn handle(&self, _: &ExceptionThrownCommand, _: &RequestContext) -> HandlerResult<()> {
        Err(Fault::msg("Exception thrown on purpose"))
    }
}
