use crate::envelope::EventEnvelope;

/// Fields every event carries next to its kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventMeta {
    /// Rendered topic (routing key).
    pub topic: String,
    /// Raw payload text, exactly as published or received.
    pub payload: String,
    /// Originator of the event, if known.
    pub source: Option<String>,
}

impl EventMeta {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>, source: Option<&str>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            source: source.map(str::to_string),
        }
    }
}

/// A domain event in its publishable form.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **self-describing** on the wire: type tag, topic and payload text are
///   enough to rebuild the typed value through an `EventFactory`
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event type tag (e.g. "ThingStatusInfoEvent").
    fn event_type(&self) -> &'static str;

    fn meta(&self) -> &EventMeta;

    fn topic(&self) -> &str {
        &self.meta().topic
    }

    fn payload(&self) -> &str {
        &self.meta().payload
    }

    /// Originator of the event; subscribers use it to ignore their own emissions.
    fn source(&self) -> Option<&str> {
        self.meta().source.as_deref()
    }

    /// The raw tuple handed to the bus.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope::new(self.event_type(), self.topic(), self.payload(), self.source())
    }
}
