//! Event factories: the single entry point that turns a received
//! `(type, topic, payload, source)` tuple back into a typed event.

use crate::error::{EventError, EventResult};
use crate::event::{Event, EventMeta};
use crate::registry::EventRegistry;

/// Builds typed events from their wire representation.
///
/// Implementations must be pure: no IO, no shared mutable state. They are
/// shared across threads by the bus side and called concurrently.
pub trait EventFactory: Send + Sync {
    type Event: Event;

    /// Type tags this factory can build.
    fn supported_event_types(&self) -> Vec<&'static str>;

    /// Build an event, or report why the tuple is not a valid event.
    ///
    /// Never returns a partially constructed or default event.
    fn create_event(
        &self,
        event_type: &str,
        topic: &str,
        payload: &str,
        source: Option<&str>,
    ) -> EventResult<Self::Event>;
}

/// Factory backed by an `EventRegistry`.
///
/// Dispatch is: registry lookup → topic match → payload decode → constructor.
#[derive(Debug)]
pub struct RegistryEventFactory<E> {
    registry: EventRegistry<E>,
}

impl<E> RegistryEventFactory<E> {
    pub fn new(registry: EventRegistry<E>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &EventRegistry<E> {
        &self.registry
    }
}

impl<E: Event> EventFactory for RegistryEventFactory<E> {
    type Event = E;

    fn supported_event_types(&self) -> Vec<&'static str> {
        self.registry.event_types()
    }

    fn create_event(
        &self,
        event_type: &str,
        topic: &str,
        payload: &str,
        source: Option<&str>,
    ) -> EventResult<E> {
        let entry = self
            .registry
            .lookup(event_type)
            .map_err(|_| EventError::UnsupportedType(event_type.to_string()))?;

        let bindings = entry.template().match_topic(topic).ok_or_else(|| {
            EventError::topic_mismatch(
                event_type,
                topic,
                format!("expected '{}'", entry.template().pattern()),
            )
        })?;

        let event = entry.construct(EventMeta::new(topic, payload, source), &bindings)?;
        tracing::debug!(event_type, topic, source, "created event");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PayloadSchema;
    use crate::topic::{TopicBindings, TopicTemplate};
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Level {
        percent: u8,
    }

    impl PayloadSchema for Level {
        const SCHEMA: &'static str = "Level";
    }

    #[derive(Debug, Clone, PartialEq)]
    struct LevelChanged {
        meta: EventMeta,
        tank: String,
        percent: u8,
    }

    impl Event for LevelChanged {
        fn event_type(&self) -> &'static str {
            "LevelChanged"
        }

        fn meta(&self) -> &EventMeta {
            &self.meta
        }
    }

    fn factory() -> RegistryEventFactory<LevelChanged> {
        let mut registry = EventRegistry::new();
        registry
            .register(
                "LevelChanged",
                TopicTemplate::parse("tanks/{tank}/level").unwrap(),
                |meta: EventMeta, bindings: &TopicBindings, level: Level| {
                    Ok(LevelChanged {
                        meta,
                        tank: bindings.get("tank").unwrap_or_default().to_string(),
                        percent: level.percent,
                    })
                },
            )
            .unwrap();
        RegistryEventFactory::new(registry)
    }

    #[test]
    fn creates_typed_event() {
        let event = factory()
            .create_event("LevelChanged", "tanks/t1/level", r#"{"percent":40}"#, Some("probe"))
            .unwrap();

        assert_eq!(event.tank, "t1");
        assert_eq!(event.percent, 40);
        assert_eq!(event.topic(), "tanks/t1/level");
        assert_eq!(event.payload(), r#"{"percent":40}"#);
        assert_eq!(event.source(), Some("probe"));

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type(), "LevelChanged");
        assert_eq!(envelope.source(), Some("probe"));
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let err = factory()
            .create_event("NoSuchEvent", "tanks/t1/level", r#"{"percent":40}"#, None)
            .unwrap_err();
        assert_eq!(err, EventError::UnsupportedType("NoSuchEvent".into()));
    }

    #[test]
    fn wrong_topic_is_a_mismatch() {
        let err = factory()
            .create_event("LevelChanged", "totally/wrong/topic", r#"{"percent":40}"#, None)
            .unwrap_err();
        assert!(matches!(err, EventError::TopicMismatch { .. }));
    }

    #[test]
    fn payload_errors_propagate() {
        let f = factory();
        assert!(matches!(
            f.create_event("LevelChanged", "tanks/t1/level", "{", None),
            Err(EventError::MalformedPayload { .. })
        ));
        assert!(matches!(
            f.create_event("LevelChanged", "tanks/t1/level", r#"{"level":1}"#, None),
            Err(EventError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn factory_is_shareable_across_threads() {
        let f = Arc::new(factory());
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let f = Arc::clone(&f);
                std::thread::spawn(move || {
                    let topic = format!("tanks/t{i}/level");
                    let payload = format!(r#"{{"percent":{i}}}"#);
                    f.create_event("LevelChanged", &topic, &payload, None).unwrap()
                })
            })
            .collect();

        for (i, h) in handles.into_iter().enumerate() {
            let event = h.join().unwrap();
            assert_eq!(event.tank, format!("t{i}"));
            assert_eq!(usize::from(event.percent), i);
        }
    }
}
