//! Factory and builders for thing events.
//!
//! Publishing side: the `create_*_event` builders render the topic and encode
//! the payload straight from domain values. Receiving side:
//! [`EventFactory::create_event`] parses the same topic/payload back. For any
//! input both sides produce equal events.

use core::str::FromStr;

use hearth_core::{ChannelUid, Entity, ThingUid};
use hearth_events::codec::{self, PayloadSchema};
use hearth_events::{
    EventError, EventFactory, EventMeta, EventRegistry, EventResult, RegistryEventFactory,
    TopicBindings, TopicTemplate,
};

use crate::config::EventsConfig;
use crate::dto::{ThingDto, ThingDtoChange};
use crate::events::{
    ChannelTriggeredEvent, ThingAddedEvent, ThingEvent, ThingRemovedEvent,
    ThingStatusInfoChangedEvent, ThingStatusInfoEvent, ThingUpdatedEvent,
};
use crate::status::{StatusInfoChange, ThingStatusInfo};
use crate::thing::Thing;
use crate::topics::{CHANNEL_UID_PLACEHOLDER, THING_UID_PLACEHOLDER, ThingTopics};
use crate::trigger::TriggerEventPayload;

/// Build the registry of every thing event kind under `topics`.
///
/// Call once at startup; any error means the catalog is inconsistent.
pub fn init_registry(topics: &ThingTopics) -> EventResult<EventRegistry<ThingEvent>> {
    let mut registry: EventRegistry<ThingEvent> = EventRegistry::new();

    registry.register(
        ThingStatusInfoEvent::TYPE,
        topics.status.clone(),
        |meta: EventMeta, bindings: &TopicBindings, status_info: ThingStatusInfo| {
            let thing_uid: ThingUid =
                bound_uid(&meta, bindings, ThingStatusInfoEvent::TYPE, THING_UID_PLACEHOLDER)?;
            Ok(ThingStatusInfoEvent {
                meta,
                thing_uid,
                status_info,
            }
            .into())
        },
    )?;

    registry.register(
        ThingStatusInfoChangedEvent::TYPE,
        topics.status_changed.clone(),
        |meta: EventMeta, bindings: &TopicBindings, StatusInfoChange(new, old): StatusInfoChange| {
            let thing_uid: ThingUid =
                bound_uid(&meta, bindings, ThingStatusInfoChangedEvent::TYPE, THING_UID_PLACEHOLDER)?;
            Ok(ThingStatusInfoChangedEvent {
                meta,
                thing_uid,
                status_info: new,
                old_status_info: old,
            }
            .into())
        },
    )?;

    registry.register(
        ThingAddedEvent::TYPE,
        topics.added.clone(),
        |meta: EventMeta, bindings: &TopicBindings, thing: ThingDto| {
            check_snapshot(&meta, bindings, ThingAddedEvent::TYPE, &thing)?;
            Ok(ThingAddedEvent { meta, thing }.into())
        },
    )?;

    registry.register(
        ThingRemovedEvent::TYPE,
        topics.removed.clone(),
        |meta: EventMeta, bindings: &TopicBindings, thing: ThingDto| {
            check_snapshot(&meta, bindings, ThingRemovedEvent::TYPE, &thing)?;
            Ok(ThingRemovedEvent { meta, thing }.into())
        },
    )?;

    registry.register(
        ThingUpdatedEvent::TYPE,
        topics.updated.clone(),
        |meta: EventMeta, bindings: &TopicBindings, ThingDtoChange(thing, old_thing): ThingDtoChange| {
            check_snapshot(&meta, bindings, ThingUpdatedEvent::TYPE, &thing)?;
            Ok(ThingUpdatedEvent {
                meta,
                thing,
                old_thing,
            }
            .into())
        },
    )?;

    registry.register(
        ChannelTriggeredEvent::TYPE,
        topics.triggered.clone(),
        |meta: EventMeta, bindings: &TopicBindings, payload: TriggerEventPayload| {
            let channel: ChannelUid =
                bound_uid(&meta, bindings, ChannelTriggeredEvent::TYPE, CHANNEL_UID_PLACEHOLDER)?;
            if payload.channel != channel {
                return Err(EventError::topic_mismatch(
                    ChannelTriggeredEvent::TYPE,
                    &meta.topic,
                    format!("payload names channel {}", payload.channel),
                ));
            }
            Ok(ChannelTriggeredEvent {
                meta,
                channel,
                event: payload.event,
            }
            .into())
        },
    )?;

    Ok(registry)
}

/// Parse a UID bound in the topic.
fn bound_uid<U>(
    meta: &EventMeta,
    bindings: &TopicBindings,
    event_type: &str,
    placeholder: &str,
) -> EventResult<U>
where
    U: FromStr,
    U::Err: core::fmt::Display,
{
    let raw = bindings.get(placeholder).ok_or_else(|| {
        EventError::topic_mismatch(event_type, &meta.topic, format!("no '{placeholder}' segment"))
    })?;
    raw.parse()
        .map_err(|e: U::Err| EventError::topic_mismatch(event_type, &meta.topic, e.to_string()))
}

/// The snapshot must describe the thing named in the topic.
fn check_snapshot(
    meta: &EventMeta,
    bindings: &TopicBindings,
    event_type: &str,
    thing: &ThingDto,
) -> EventResult<()> {
    let thing_uid: ThingUid = bound_uid(meta, bindings, event_type, THING_UID_PLACEHOLDER)?;
    if thing.uid != thing_uid {
        return Err(EventError::topic_mismatch(
            event_type,
            &meta.topic,
            format!("payload describes thing {}", thing.uid),
        ));
    }
    Ok(())
}

/// Thing event factory: registry-driven parsing plus typed builders.
#[derive(Debug)]
pub struct ThingEventFactory {
    topics: ThingTopics,
    inner: RegistryEventFactory<ThingEvent>,
}

impl ThingEventFactory {
    /// Factory with the default topic prefix.
    pub fn new() -> EventResult<Self> {
        Self::with_config(&EventsConfig::default())
    }

    pub fn with_config(config: &EventsConfig) -> EventResult<Self> {
        let topics = ThingTopics::new(&config.topic_prefix)?;
        let registry = init_registry(&topics)?;
        tracing::debug!(
            prefix = %config.topic_prefix,
            event_types = registry.len(),
            "thing event factory ready"
        );
        Ok(Self {
            topics,
            inner: RegistryEventFactory::new(registry),
        })
    }

    pub fn topics(&self) -> &ThingTopics {
        &self.topics
    }

    pub fn create_status_info_event(
        &self,
        thing_uid: &ThingUid,
        status_info: &ThingStatusInfo,
    ) -> EventResult<ThingStatusInfoEvent> {
        let meta = build_meta(&self.topics.status, thing_bindings(thing_uid), status_info)?;
        Ok(ThingStatusInfoEvent {
            meta,
            thing_uid: thing_uid.clone(),
            status_info: status_info.clone(),
        })
    }

    pub fn create_status_info_changed_event(
        &self,
        thing_uid: &ThingUid,
        status_info: &ThingStatusInfo,
        old_status_info: &ThingStatusInfo,
    ) -> EventResult<ThingStatusInfoChangedEvent> {
        let payload = StatusInfoChange(status_info.clone(), old_status_info.clone());
        let meta = build_meta(&self.topics.status_changed, thing_bindings(thing_uid), &payload)?;
        let StatusInfoChange(status_info, old_status_info) = payload;
        Ok(ThingStatusInfoChangedEvent {
            meta,
            thing_uid: thing_uid.clone(),
            status_info,
            old_status_info,
        })
    }

    pub fn create_added_event(&self, thing: &Thing) -> EventResult<ThingAddedEvent> {
        let dto = ThingDto::from(thing);
        let meta = build_meta(&self.topics.added, thing_bindings(thing.uid()), &dto)?;
        Ok(ThingAddedEvent { meta, thing: dto })
    }

    pub fn create_removed_event(&self, thing: &Thing) -> EventResult<ThingRemovedEvent> {
        let dto = ThingDto::from(thing);
        let meta = build_meta(&self.topics.removed, thing_bindings(thing.uid()), &dto)?;
        Ok(ThingRemovedEvent { meta, thing: dto })
    }

    /// The topic names the updated thing; `old_thing` is carried as-is.
    pub fn create_updated_event(&self, thing: &Thing, old_thing: &Thing) -> EventResult<ThingUpdatedEvent> {
        let payload = ThingDtoChange(ThingDto::from(thing), ThingDto::from(old_thing));
        let meta = build_meta(&self.topics.updated, thing_bindings(thing.uid()), &payload)?;
        let ThingDtoChange(thing, old_thing) = payload;
        Ok(ThingUpdatedEvent {
            meta,
            thing,
            old_thing,
        })
    }

    pub fn create_trigger_event(
        &self,
        event: &str,
        channel: &ChannelUid,
    ) -> EventResult<ChannelTriggeredEvent> {
        let payload = TriggerEventPayload {
            event: event.to_string(),
            channel: channel.clone(),
        };
        let bindings = TopicBindings::new().with(CHANNEL_UID_PLACEHOLDER, channel.as_str());
        let meta = build_meta(&self.topics.triggered, bindings, &payload)?;
        Ok(ChannelTriggeredEvent {
            meta,
            channel: payload.channel,
            event: payload.event,
        })
    }
}

fn thing_bindings(thing_uid: &ThingUid) -> TopicBindings {
    TopicBindings::new().with(THING_UID_PLACEHOLDER, thing_uid.as_str())
}

fn build_meta<P: PayloadSchema>(
    template: &TopicTemplate,
    bindings: TopicBindings,
    payload: &P,
) -> EventResult<EventMeta> {
    let topic = template.render(&bindings)?;
    let payload = codec::encode(payload)?;
    Ok(EventMeta::new(topic, payload, None))
}

impl EventFactory for ThingEventFactory {
    type Event = ThingEvent;

    fn supported_event_types(&self) -> Vec<&'static str> {
        self.inner.supported_event_types()
    }

    fn create_event(
        &self,
        event_type: &str,
        topic: &str,
        payload: &str,
        source: Option<&str>,
    ) -> EventResult<ThingEvent> {
        self.inner.create_event(event_type, topic, payload, source)
    }
}
