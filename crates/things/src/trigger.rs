//! Trigger channel payloads.

use serde::{Deserialize, Serialize};

use hearth_core::ChannelUid;
use hearth_events::PayloadSchema;

/// Trigger labels shared by many bindings.
pub mod common_trigger_events {
    pub const PRESSED: &str = "PRESSED";
    pub const RELEASED: &str = "RELEASED";
    pub const SHORT_PRESSED: &str = "SHORT_PRESSED";
    pub const LONG_PRESSED: &str = "LONG_PRESSED";
    pub const DOUBLE_PRESSED: &str = "DOUBLE_PRESSED";
    pub const DIR1_PRESSED: &str = "DIR1_PRESSED";
    pub const DIR1_RELEASED: &str = "DIR1_RELEASED";
    pub const DIR2_PRESSED: &str = "DIR2_PRESSED";
    pub const DIR2_RELEASED: &str = "DIR2_RELEASED";
}

/// `{"event": "...", "channel": "binding:type:id:channel"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerEventPayload {
    pub event: String,
    pub channel: ChannelUid,
}

impl PayloadSchema for TriggerEventPayload {
    const SCHEMA: &'static str = "TriggerEvent";
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_events::{EventError, codec};

    #[test]
    fn requires_channel() {
        let err = codec::decode::<TriggerEventPayload>(r#"{"event":"PRESSED"}"#).unwrap_err();
        assert!(matches!(err, EventError::SchemaMismatch { schema: "TriggerEvent", .. }));
    }

    #[test]
    fn broken_text_is_malformed() {
        let err = codec::decode::<TriggerEventPayload>(r#"{"event":"PRESSED","#).unwrap_err();
        assert!(matches!(err, EventError::MalformedPayload { .. }));
    }
}
