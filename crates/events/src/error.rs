//! Event layer error model.

use thiserror::Error;

/// Result type used across the event layer.
pub type EventResult<T> = Result<T, EventError>;

/// Everything that can go wrong while registering event kinds, rendering
/// topics, or turning a received `(type, topic, payload, source)` tuple back
/// into a typed event.
///
/// Registration errors (`InvalidTemplate`, `DuplicateTag`, `AmbiguousTemplate`)
/// only occur while the registry is built. All other variants are per-call
/// failures that the caller is expected to log and drop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// No event kind is registered under this type tag.
    #[error("unsupported event type '{0}'")]
    UnsupportedType(String),

    /// The type tag is known but the topic does not have the registered shape.
    #[error("topic '{topic}' does not fit event type '{event_type}': {reason}")]
    TopicMismatch {
        event_type: String,
        topic: String,
        reason: String,
    },

    /// The payload is not syntactically valid JSON.
    #[error("malformed {schema} payload: {reason}")]
    MalformedPayload { schema: &'static str, reason: String },

    /// The payload is valid JSON but does not fit the schema of the event kind.
    #[error("{schema} payload does not match schema: {reason}")]
    SchemaMismatch { schema: &'static str, reason: String },

    /// A template placeholder had no value while rendering.
    #[error("no binding for placeholder '{placeholder}' of template '{template}'")]
    MissingBinding { placeholder: String, template: String },

    /// A bound value cannot be used as a topic segment.
    #[error("invalid identifier '{value}' for placeholder '{placeholder}'")]
    InvalidIdentifier { placeholder: String, value: String },

    /// A topic template pattern is malformed.
    #[error("invalid topic template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// The type tag was registered twice.
    #[error("event type '{0}' is already registered")]
    DuplicateTag(String),

    /// A template can match the same concrete topic as an already registered one.
    #[error(
        "template '{template}' is ambiguous with '{existing_template}' of event type '{existing_type}'"
    )]
    AmbiguousTemplate {
        template: String,
        existing_type: String,
        existing_template: String,
    },

    /// Registry lookup miss.
    #[error("event type '{0}' not found in registry")]
    NotFound(String),
}

impl EventError {
    pub fn topic_mismatch(
        event_type: impl Into<String>,
        topic: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::TopicMismatch {
            event_type: event_type.into(),
            topic: topic.into(),
            reason: reason.into(),
        }
    }

    pub fn schema_mismatch(schema: &'static str, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            schema,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error can only occur while building the registry.
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTemplate { .. } | Self::DuplicateTag(_) | Self::AmbiguousTemplate { .. }
        )
    }
}
