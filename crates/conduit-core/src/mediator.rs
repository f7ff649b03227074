//! Request dispatch.
//!
//! [`MediatorBuilder`] collects one handler and any number of validators per
//! request type and assembles a [`Pipeline`] for each at build time. The
//! resulting [`Mediator`] is immutable, cheap to clone and safe to share
//! across tasks.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use conduit_domain::Outcome;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span};

use crate::config::PipelineConfig;
use crate::context::RequestContext;
use crate::error::{MediatorError, MediatorResult};
use crate::handler::Handler;
use crate::pipeline::Pipeline;
use crate::request::{Request, request_name};
use crate::validation::Validator;

type AnyPipeline = Arc<dyn Any + Send + Sync>;
type AnyValidators = Box<dyn Any + Send + Sync>;
type PipelineFactory = Box<dyn FnOnce(&PipelineConfig, Option<AnyValidators>) -> AnyPipeline + Send>;

struct Registration {
    type_id: TypeId,
    request_type: &'static str,
    factory: PipelineFactory,
}

struct ValidatorEntry {
    request_type: &'static str,
    validators: AnyValidators,
}

/// Collects registrations for a [`Mediator`]
pub struct MediatorBuilder {
    config: PipelineConfig,
    registrations: Vec<Registration>,
    validators: HashMap<TypeId, ValidatorEntry>,
    duplicate: Option<&'static str>,
}

impl Default for MediatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MediatorBuilder {
    /// Builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            registrations: Vec::new(),
            validators: HashMap::new(),
            duplicate: None,
        }
    }

    /// Choose which standard behaviors are active
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Register the handler for `R`
    pub fn handler<R, H>(self, handler: H) -> Self
    where
        R: Request,
        H: Handler<R> + 'static,
    {
        self.shared_handler::<R>(Arc::new(handler))
    }

    /// Register an already shared handler for `R`
    pub fn shared_handler<R: Request>(mut self, handler: Arc<dyn Handler<R>>) -> Self {
        let type_id = TypeId::of::<R>();
        if self.registrations.iter().any(|r| r.type_id == type_id) {
            self.duplicate.get_or_insert(request_name::<R>());
            return self;
        }

        let factory: PipelineFactory = Box::new(move |config, validators| {
            let validators = validators
                .and_then(|v| v.downcast::<Vec<Arc<dyn Validator<R>>>>().ok())
                .map(|v| *v)
                .unwrap_or_default();
            let pipeline = config
                .behaviors::<R>(validators)
                .into_iter()
                .fold(Pipeline::new(handler), Pipeline::with_behavior);
            Arc::new(pipeline) as AnyPipeline
        });
        self.registrations.push(Registration {
            type_id,
            request_type: request_name::<R>(),
            factory,
        });
        self
    }

    /// Add a validator for `R`; validators run in registration order
    pub fn validator<R, V>(mut self, validator: V) -> Self
    where
        R: Request,
        V: Validator<R> + 'static,
    {
        let entry = self
            .validators
            .entry(TypeId::of::<R>())
            .or_insert_with(|| ValidatorEntry {
                request_type: request_name::<R>(),
                validators: Box::new(Vec::<Arc<dyn Validator<R>>>::new()),
            });
        if let Some(list) = entry.validators.downcast_mut::<Vec<Arc<dyn Validator<R>>>>() {
            list.push(Arc::new(validator));
        }
        self
    }

    /// Assemble every pipeline.
    ///
    /// # Errors
    ///
    /// Fails with [`MediatorError::DuplicateHandler`] when a request type got
    /// two handlers, and with [`MediatorError::ValidatorWithoutHandler`] when
    /// validators were registered for a type nobody handles.
    pub fn build(self) -> MediatorResult<Mediator> {
        let Self {
            config,
            registrations,
            mut validators,
            duplicate,
        } = self;

        if let Some(request_type) = duplicate {
            return Err(MediatorError::DuplicateHandler(request_type));
        }

        let mut pipelines = HashMap::with_capacity(registrations.len());
        for registration in registrations {
            let entry = validators.remove(&registration.type_id);
            let pipeline = (registration.factory)(&config, entry.map(|e| e.validators));
            debug!(
                request_type = registration.request_type,
                "pipeline assembled"
            );
            pipelines.insert(registration.type_id, pipeline);
        }

        if let Some(orphan) = validators.values().next() {
            return Err(MediatorError::ValidatorWithoutHandler(orphan.request_type));
        }

        debug!(
            handlers = pipelines.len(),
            behaviors = ?config.active(),
            "mediator built"
        );
        Ok(Mediator {
            inner: Arc::new(Registry { config, pipelines }),
        })
    }
}

impl std::fmt::Debug for MediatorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediatorBuilder")
            .field("config", &self.config)
            .field("handlers", &self.registrations.len())
            .finish_non_exhaustive()
    }
}

struct Registry {
    config: PipelineConfig,
    pipelines: HashMap<TypeId, AnyPipeline>,
}

/// Dispatches requests to their handler through the standard pipeline
#[derive(Clone)]
pub struct Mediator {
    inner: Arc<Registry>,
}

impl Mediator {
    /// Start configuring a mediator
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Dispatch `request`.
    ///
    /// Domain failures, validation failures, notifications and contained
    /// faults all come back as a failed [`Outcome`].
    ///
    /// # Errors
    ///
    /// [`MediatorError::HandlerNotRegistered`] when nobody handles `R`, and
    /// [`MediatorError::Unhandled`] when a fault escapes because the
    /// exception behavior is disabled.
    pub async fn send<R: Request>(&self, request: R) -> MediatorResult<Outcome<R::Response>> {
        self.send_with_cancellation(request, CancellationToken::new())
            .await
    }

    /// Dispatch `request`, letting the caller abort it through `cancellation`
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_with_cancellation<R: Request>(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> MediatorResult<Outcome<R::Response>> {
        let pipeline = self.pipeline::<R>()?;
        let ctx = RequestContext::new(cancellation);
        let span = info_span!(
            "dispatch",
            request_type = request_name::<R>(),
            request_id = %ctx.request_id(),
        );

        pipeline
            .execute(&request, &ctx)
            .instrument(span)
            .await
            .map_err(MediatorError::Unhandled)
    }

    /// Whether a handler is registered for `R`
    pub fn has_handler<R: Request>(&self) -> bool {
        self.inner.pipelines.contains_key(&TypeId::of::<R>())
    }

    /// Behaviors active in every pipeline
    pub fn config(&self) -> &PipelineConfig {
        &self.inner.config
    }

    fn pipeline<R: Request>(&self) -> MediatorResult<Arc<Pipeline<R>>> {
        self.inner
            .pipelines
            .get(&TypeId::of::<R>())
            .cloned()
            .and_then(|pipeline| pipeline.downcast::<Pipeline<R>>().ok())
            .ok_or_else(|| MediatorError::HandlerNotRegistered(request_name::<R>()))
    }
}

impl std::fmt::Debug for Mediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mediator")
            .field("config", &self.inner.config)
            .field("handlers", &self.inner.pipelines.len())
            .finish()
    }
}
