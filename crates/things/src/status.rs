//! Thing status as reported by bindings.

use serde::{Deserialize, Serialize};

use hearth_core::ValueObject;
use hearth_events::PayloadSchema;

/// Lifecycle / connectivity status of a thing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThingStatus {
    Uninitialized,
    Initializing,
    Unknown,
    Online,
    Offline,
    Removing,
    Removed,
}

/// Finer-grained reason attached to a `ThingStatus`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThingStatusDetail {
    None,
    HandlerMissingError,
    HandlerRegisteringError,
    HandlerInitializingError,
    HandlerConfigurationPending,
    ConfigurationPending,
    CommunicationError,
    ConfigurationError,
    BridgeOffline,
    FirmwareUpdating,
    DutyCycle,
    BridgeUninitialized,
    Gone,
    Disabled,
}

/// Status, detail and an optional human-readable description.
///
/// Wire shape: `{"status":"OFFLINE","statusDetail":"COMMUNICATION_ERROR","description":"..."}`,
/// with `description` omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThingStatusInfo {
    status: ThingStatus,
    status_detail: ThingStatusDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ThingStatusInfo {
    pub fn new(status: ThingStatus, status_detail: ThingStatusDetail) -> Self {
        Self {
            status,
            status_detail,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(&self) -> ThingStatus {
        self.status
    }

    pub fn status_detail(&self) -> ThingStatusDetail {
        self.status_detail
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl ValueObject for ThingStatusInfo {}

impl PayloadSchema for ThingStatusInfo {
    const SCHEMA: &'static str = "ThingStatusInfo";
}

impl core::fmt::Display for ThingStatusInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} ({:?})", self.status, self.status_detail)?;
        if let Some(d) = &self.description {
            write!(f, ": {d}")?;
        }
        Ok(())
    }
}

/// `[new, old]` pair carried by status-changed events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfoChange(pub ThingStatusInfo, pub ThingStatusInfo);

impl PayloadSchema for StatusInfoChange {
    const SCHEMA: &'static str = "[ThingStatusInfo, ThingStatusInfo]";
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_events::{EventError, codec};

    #[test]
    fn wire_shape_matches_status_payload() {
        let info = ThingStatusInfo::new(ThingStatus::Offline, ThingStatusDetail::CommunicationError)
            .with_description("Some description");
        assert_eq!(
            codec::encode(&info).unwrap(),
            r#"{"status":"OFFLINE","statusDetail":"COMMUNICATION_ERROR","description":"Some description"}"#
        );

        let bare = ThingStatusInfo::new(ThingStatus::Online, ThingStatusDetail::None);
        assert_eq!(
            codec::encode(&bare).unwrap(),
            r#"{"status":"ONLINE","statusDetail":"NONE"}"#
        );
    }

    #[test]
    fn unknown_status_is_a_schema_mismatch() {
        let err = codec::decode::<ThingStatusInfo>(r#"{"status":"ASLEEP","statusDetail":"NONE"}"#)
            .unwrap_err();
        assert!(matches!(err, EventError::SchemaMismatch { schema: "ThingStatusInfo", .. }));
    }

    #[test]
    fn change_pair_is_a_json_array() {
        let new = ThingStatusInfo::new(ThingStatus::Online, ThingStatusDetail::None);
        let old = ThingStatusInfo::new(ThingStatus::Unknown, ThingStatusDetail::None);
        let text = codec::encode(&StatusInfoChange(new.clone(), old.clone())).unwrap();
        assert!(text.starts_with('['));
        assert_eq!(codec::decode::<StatusInfoChange>(&text).unwrap(), StatusInfoChange(new, old));
        assert!(codec::decode::<StatusInfoChange>("[]").is_err());
    }

    #[test]
    fn display_is_compact() {
        let info = ThingStatusInfo::new(ThingStatus::Offline, ThingStatusDetail::Gone)
            .with_description("unplugged");
        assert_eq!(info.to_string(), "Offline (Gone): unplugged");
    }
}
