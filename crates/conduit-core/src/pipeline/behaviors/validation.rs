//! Runs the registered validators before the handler

use std::sync::Arc;

use async_trait::async_trait;
use conduit_domain::{Error, Errors, FieldError, Outcome};
use tracing::{debug, warn};

use crate::context::RequestContext;
use crate::handler::HandlerResult;
use crate::pipeline::{Next, PipelineBehavior};
use crate::request::{Request, request_name};
use crate::validation::Validator;

/// Runs every validator of the request type, in registration order.
///
/// When any of them reports a failure, the handler is skipped and the
/// outcome carries one validation error per failure, in the order reported.
pub struct ValidationBehavior<R> {
    validators: Vec<Arc<dyn Validator<R>>>,
}

impl<R> ValidationBehavior<R> {
    /// Behavior running `validators`
    pub fn new(validators: Vec<Arc<dyn Validator<R>>>) -> Self {
        Self { validators }
    }

    /// Number of validators
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether there is nothing to run
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

#[async_trait]
impl<R: Request> PipelineBehavior<R> for ValidationBehavior<R> {
    fn name(&self) -> &'static str {
        "validation"
    }

    async fn handle(
        &self,
        request: &R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> HandlerResult<R::Response> {
        if self.validators.is_empty() {
            return next.run(request, ctx).await;
        }

        let request_type = request_name::<R>();
        let failures: Vec<FieldError> = self
            .validators
            .iter()
            .flat_map(|validator| validator.validate(request))
            .collect();
        debug!(
            request_type,
            errors = failures.len(),
            "{request_type} - validated with {} error(s)",
            failures.len()
        );

        let errors = match Errors::new(failures.into_iter().map(Error::validation).collect()) {
            Ok(errors) => errors,
            Err(_) => return next.run(request, ctx).await,
        };
        for error in &errors {
            warn!(request_type, "{request_type} - {}", error.message());
        }
        Ok(Outcome::from(errors))
    }
}

impl<R> std::fmt::Debug for ValidationBehavior<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationBehavior")
            .field("validators", &self.validators.len())
            .finish()
    }
}
