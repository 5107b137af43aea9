//! `hearth-things`: thing and channel events.
//!
//! Builders on [`ThingEventFactory`] turn domain values (status infos, thing
//! snapshots, trigger labels) into publishable events; the same factory,
//! through [`hearth_events::EventFactory`], turns received
//! `(type, topic, payload, source)` tuples back into [`ThingEvent`]s.

pub mod config;
pub mod dto;
pub mod events;
pub mod factory;
pub mod status;
pub mod thing;
pub mod topics;
pub mod trigger;

pub use config::EventsConfig;
pub use dto::{ChannelDto, ThingDto};
pub use events::{
    ChannelTriggeredEvent, ThingAddedEvent, ThingEvent, ThingRemovedEvent,
    ThingStatusInfoChangedEvent, ThingStatusInfoEvent, ThingUpdatedEvent,
};
pub use factory::{ThingEventFactory, init_registry};
pub use status::{ThingStatus, ThingStatusDetail, ThingStatusInfo};
pub use thing::{Channel, ChannelKind, Thing};
pub use topics::ThingTopics;
pub use trigger::{TriggerEventPayload, common_trigger_events};
