//! Receive-side glue between a bus and typed subscribers.
//!
//! The dispatcher is the caller the factory was built for: it takes raw
//! envelopes off a subscription, asks the factory for a typed event, and fans
//! the event out to interested subscribers. Envelopes the factory rejects are
//! logged and dropped; they never reach a subscriber and never stop the loop.

use std::sync::Arc;

use crate::bus::Subscription;
use crate::envelope::EventEnvelope;
use crate::error::EventResult;
use crate::event::Event;
use crate::factory::EventFactory;
use crate::subscriber::{ALL_EVENT_TYPES, EventSubscriber};

/// Result of draining a subscription.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DispatchStats {
    /// Envelopes turned into events.
    pub created: usize,
    /// Envelopes the factory rejected.
    pub dropped: usize,
    /// Individual subscriber deliveries.
    pub delivered: usize,
}

pub struct EventDispatcher<F: EventFactory> {
    factory: F,
    subscribers: Vec<Arc<dyn EventSubscriber<F::Event>>>,
}

impl<F: EventFactory> EventDispatcher<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            subscribers: Vec::new(),
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn EventSubscriber<F::Event>>) {
        self.subscribers.push(subscriber);
    }

    /// Build the event for one envelope and deliver it.
    ///
    /// Returns the number of subscribers that received the event. Factory
    /// errors are logged at `warn` and returned to the caller.
    pub fn dispatch(&self, envelope: &EventEnvelope) -> EventResult<usize> {
        let event = self
            .factory
            .create_event(
                envelope.event_type(),
                envelope.topic(),
                envelope.payload(),
                envelope.source(),
            )
            .inspect_err(|err| {
                tracing::warn!(
                    event_type = envelope.event_type(),
                    topic = envelope.topic(),
                    error = %err,
                    "dropping event that could not be created"
                );
            })?;

        Ok(self.deliver(&event))
    }

    /// Deliver an already typed event to every matching subscriber.
    pub fn deliver(&self, event: &F::Event) -> usize {
        let mut delivered = 0;
        for subscriber in &self.subscribers {
            if !wants(subscriber.as_ref(), event) {
                continue;
            }
            subscriber.receive(event);
            delivered += 1;
        }
        delivered
    }

    /// Dispatch every envelope currently queued on `subscription`, without
    /// blocking.
    pub fn drain(&self, subscription: &Subscription<EventEnvelope>) -> DispatchStats {
        let mut stats = DispatchStats::default();
        while let Ok(envelope) = subscription.try_recv() {
            match self.dispatch(&envelope) {
                Ok(n) => {
                    stats.created += 1;
                    stats.delivered += n;
                }
                Err(_) => stats.dropped += 1,
            }
        }
        stats
    }
}

fn wants<E: Event>(subscriber: &dyn EventSubscriber<E>, event: &E) -> bool {
    let types = subscriber.subscribed_event_types();
    let type_ok = types
        .iter()
        .any(|t| *t == ALL_EVENT_TYPES || *t == event.event_type());
    type_ok && subscriber.event_filter().is_none_or(|f| f.apply(event))
}

impl<F: EventFactory + core::fmt::Debug> core::fmt::Debug for EventDispatcher<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("factory", &self.factory)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
