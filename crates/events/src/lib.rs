//! `hearth-events`: event kinds, topics and payloads, independent of any
//! particular domain.
//!
//! The pieces, leaf first:
//! - [`topic`]: topic templates with named placeholders (render / match)
//! - [`codec`]: deterministic JSON payload encode / schema-checked decode
//! - [`registry`]: type tag → template, schema and constructor
//! - [`factory`]: the `(type, topic, payload, source)` → typed event entry point
//! - [`bus`], [`dispatch`], [`filter`], [`subscriber`]: the receive side that
//!   calls the factory and fans events out

pub mod bus;
pub mod codec;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod event;
pub mod factory;
pub mod filter;
pub mod in_memory_bus;
pub mod registry;
pub mod subscriber;
pub mod topic;

pub use bus::{EventBus, Subscription};
pub use codec::PayloadSchema;
pub use dispatch::{DispatchStats, EventDispatcher};
pub use envelope::EventEnvelope;
pub use error::{EventError, EventResult};
pub use event::{Event, EventMeta};
pub use factory::{EventFactory, RegistryEventFactory};
pub use filter::{EventFilter, SourceFilter, TopicEventFilter};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use registry::{EventRegistry, RegistryEntry};
pub use subscriber::{ALL_EVENT_TYPES, EventSubscriber};
pub use topic::{TopicBindings, TopicTemplate};
