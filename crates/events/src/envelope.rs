use serde::{Deserialize, Serialize};

/// The raw `(type, topic, payload, source)` tuple as it travels on a bus.
///
/// This is the unit a transport carries. It is deliberately untyped: turning
/// it back into a typed event is the job of an `EventFactory`, which validates
/// the topic shape and the payload schema for the given type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    event_type: String,
    topic: String,
    payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl EventEnvelope {
    pub fn new(
        event_type: impl Into<String>,
        topic: impl Into<String>,
        payload: impl Into<String>,
        source: Option<&str>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            topic: topic.into(),
            payload: payload.into(),
            source: source.map(str::to_string),
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
