//! Thing event kinds.
//!
//! Each kind is its own struct carrying the common [`EventMeta`] plus typed
//! fields; [`ThingEvent`] is the closed sum over all of them.

use hearth_core::{ChannelUid, ThingUid};
use hearth_events::{Event, EventMeta};

use crate::dto::ThingDto;
use crate::status::ThingStatusInfo;

/// A thing reported its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ThingStatusInfoEvent {
    pub(crate) meta: EventMeta,
    pub(crate) thing_uid: ThingUid,
    pub(crate) status_info: ThingStatusInfo,
}

impl ThingStatusInfoEvent {
    pub fn thing_uid(&self) -> &ThingUid {
        &self.thing_uid
    }

    pub fn status_info(&self) -> &ThingStatusInfo {
        &self.status_info
    }
}

/// A thing's status differs from the previously reported one.
#[derive(Debug, Clone, PartialEq)]
pub struct ThingStatusInfoChangedEvent {
    pub(crate) meta: EventMeta,
    pub(crate) thing_uid: ThingUid,
    pub(crate) status_info: ThingStatusInfo,
    pub(crate) old_status_info: ThingStatusInfo,
}

impl ThingStatusInfoChangedEvent {
    pub fn thing_uid(&self) -> &ThingUid {
        &self.thing_uid
    }

    pub fn status_info(&self) -> &ThingStatusInfo {
        &self.status_info
    }

    pub fn old_status_info(&self) -> &ThingStatusInfo {
        &self.old_status_info
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThingAddedEvent {
    pub(crate) meta: EventMeta,
    pub(crate) thing: ThingDto,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThingRemovedEvent {
    pub(crate) meta: EventMeta,
    pub(crate) thing: ThingDto,
}

macro_rules! impl_snapshot_accessors {
    ($t:ty) => {
        impl $t {
            /// Snapshot of the thing.
            pub fn thing(&self) -> &ThingDto {
                &self.thing
            }
        }
    };
}

impl_snapshot_accessors!(ThingAddedEvent);
impl_snapshot_accessors!(ThingRemovedEvent);

#[derive(Debug, Clone, PartialEq)]
pub struct ThingUpdatedEvent {
    pub(crate) meta: EventMeta,
    pub(crate) thing: ThingDto,
    pub(crate) old_thing: ThingDto,
}

impl ThingUpdatedEvent {
    pub fn thing(&self) -> &ThingDto {
        &self.thing
    }

    pub fn old_thing(&self) -> &ThingDto {
        &self.old_thing
    }
}

/// A trigger channel fired.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelTriggeredEvent {
    pub(crate) meta: EventMeta,
    pub(crate) channel: ChannelUid,
    pub(crate) event: String,
}

impl ChannelTriggeredEvent {
    pub fn channel(&self) -> &ChannelUid {
        &self.channel
    }

    /// Trigger label, e.g. `PRESSED`.
    pub fn event(&self) -> &str {
        &self.event
    }
}

/// Every thing event kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ThingEvent {
    StatusInfo(ThingStatusInfoEvent),
    StatusInfoChanged(ThingStatusInfoChangedEvent),
    Added(ThingAddedEvent),
    Removed(ThingRemovedEvent),
    Updated(ThingUpdatedEvent),
    ChannelTriggered(ChannelTriggeredEvent),
}

impl ThingEvent {
    /// The thing the event is about (for trigger events: the channel's thing).
    pub fn thing_uid(&self) -> ThingUid {
        match self {
            ThingEvent::StatusInfo(e) => e.thing_uid.clone(),
            ThingEvent::StatusInfoChanged(e) => e.thing_uid.clone(),
            ThingEvent::Added(e) => e.thing.uid.clone(),
            ThingEvent::Removed(e) => e.thing.uid.clone(),
            ThingEvent::Updated(e) => e.thing.uid.clone(),
            ThingEvent::ChannelTriggered(e) => e.channel.thing_uid(),
        }
    }
}

impl Event for ThingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ThingEvent::StatusInfo(_) => ThingStatusInfoEvent::TYPE,
            ThingEvent::StatusInfoChanged(_) => ThingStatusInfoChangedEvent::TYPE,
            ThingEvent::Added(_) => ThingAddedEvent::TYPE,
            ThingEvent::Removed(_) => ThingRemovedEvent::TYPE,
            ThingEvent::Updated(_) => ThingUpdatedEvent::TYPE,
            ThingEvent::ChannelTriggered(_) => ChannelTriggeredEvent::TYPE,
        }
    }

    fn meta(&self) -> &EventMeta {
        match self {
            ThingEvent::StatusInfo(e) => &e.meta,
            ThingEvent::StatusInfoChanged(e) => &e.meta,
            ThingEvent::Added(e) => &e.meta,
            ThingEvent::Removed(e) => &e.meta,
            ThingEvent::Updated(e) => &e.meta,
            ThingEvent::ChannelTriggered(e) => &e.meta,
        }
    }
}

macro_rules! impl_thing_event {
    ($t:ident, $variant:ident) => {
        impl $t {
            /// Event type tag.
            pub const TYPE: &'static str = stringify!($t);

            /// Mark the originator of the event.
            pub fn with_source(mut self, source: impl Into<String>) -> Self {
                self.meta.source = Some(source.into());
                self
            }
        }

        impl Event for $t {
            fn event_type(&self) -> &'static str {
                Self::TYPE
            }

            fn meta(&self) -> &EventMeta {
                &self.meta
            }
        }

        impl From<$t> for ThingEvent {
            fn from(event: $t) -> Self {
                ThingEvent::$variant(event)
            }
        }
    };
}

impl_thing_event!(ThingStatusInfoEvent, StatusInfo);
impl_thing_event!(ThingStatusInfoChangedEvent, StatusInfoChanged);
impl_thing_event!(ThingAddedEvent, Added);
impl_thing_event!(ThingRemovedEvent, Removed);
impl_thing_event!(ThingUpdatedEvent, Updated);
impl_thing_event!(ChannelTriggeredEvent, ChannelTriggered);

impl ThingEvent {
    /// Mark the originator of the event.
    pub fn with_source(self, source: impl Into<String>) -> Self {
        match self {
            ThingEvent::StatusInfo(e) => e.with_source(source).into(),
            ThingEvent::StatusInfoChanged(e) => e.with_source(source).into(),
            ThingEvent::Added(e) => e.with_source(source).into(),
            ThingEvent::Removed(e) => e.with_source(source).into(),
            ThingEvent::Updated(e) => e.with_source(source).into(),
            ThingEvent::ChannelTriggered(e) => e.with_source(source).into(),
        }
    }
}
