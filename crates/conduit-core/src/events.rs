//! In-process event publishing.
//!
//! Handlers publish facts ("person created") after their state change.
//! Every subscriber of the event type runs in subscription order; a
//! subscriber that fails or panics is logged and reported in the publish
//! outcome without stopping the others.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use conduit_domain::{Error, Errors, FaultId, Outcome};
use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::Fault;
use crate::request::request_name;

/// A fact published on an [`EventBus`]
pub trait Event: fmt::Debug + Send + Sync + 'static {}

/// Reacts to one event type
#[async_trait]
pub trait EventHandler<E: Event>: Send + Sync {
    /// Handle `event`
    async fn handle(&self, event: &E, cancellation: &CancellationToken) -> Result<(), Fault>;
}

type Subscribers<E> = Vec<Arc<dyn EventHandler<E>>>;

/// Collects subscriptions for an [`EventBus`]
#[derive(Default)]
pub struct EventBusBuilder {
    subscribers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EventBusBuilder {
    /// Builder without subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to events of type `E`
    pub fn subscribe<E, H>(mut self, handler: H) -> Self
    where
        E: Event,
        H: EventHandler<E> + 'static,
    {
        let entry = self
            .subscribers
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Subscribers::<E>::new()));
        if let Some(list) = entry.downcast_mut::<Subscribers<E>>() {
            list.push(Arc::new(handler));
        }
        self
    }

    /// Freeze the subscriptions
    pub fn build(self) -> EventBus {
        EventBus {
            subscribers: Arc::new(self.subscribers),
        }
    }
}

impl fmt::Debug for EventBusBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBusBuilder")
            .field("event_types", &self.subscribers.len())
            .finish()
    }
}

/// Immutable set of event subscriptions, cheap to clone
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl EventBus {
    /// Start configuring a bus
    pub fn builder() -> EventBusBuilder {
        EventBusBuilder::new()
    }

    /// Number of subscribers for `E`
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.subscribers_of::<E>().map_or(0, Vec::len)
    }

    /// Publish `event` to every subscriber
    pub async fn publish<E: Event>(&self, event: &E) -> Outcome {
        self.publish_with_cancellation(event, &CancellationToken::new())
            .await
    }

    /// Publish `event`, passing `cancellation` on to the subscribers.
    ///
    /// Succeeds when every subscriber succeeded; otherwise the outcome holds
    /// one fault error per failed subscriber.
    pub async fn publish_with_cancellation<E: Event>(
        &self,
        event: &E,
        cancellation: &CancellationToken,
    ) -> Outcome {
        let Some(subscribers) = self.subscribers_of::<E>() else {
            debug!(event_type = request_name::<E>(), "no subscribers");
            return Outcome::unit();
        };

        let event_type = request_name::<E>();
        let mut failures = Vec::new();
        for (index, subscriber) in subscribers.iter().enumerate() {
            let fault = match AssertUnwindSafe(subscriber.handle(event, cancellation))
                .catch_unwind()
                .await
            {
                Ok(Ok(())) => continue,
                Ok(Err(fault)) => fault,
                Err(payload) => Fault::from_panic(payload),
            };
            let fault_id = FaultId::new();
            error!(
                event_type,
                subscriber = index,
                %fault_id,
                event = ?event,
                error = %fault,
                "{event_type} - subscriber failed"
            );
            failures.push(Error::fault(fault_id));
        }

        debug!(
            event_type,
            subscribers = subscribers.len(),
            failed = failures.len(),
            "{event_type} - published"
        );
        Errors::new(failures).map_or_else(|_| Outcome::unit(), Outcome::from)
    }

    fn subscribers_of<E: Event>(&self) -> Option<&Subscribers<E>> {
        self.subscribers
            .get(&TypeId::of::<E>())
            .and_then(|any| any.downcast_ref::<Subscribers<E>>())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("event_types", &self.subscribers.len())
            .finish()
    }
}
