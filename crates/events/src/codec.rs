//! Payload codec: JSON text ↔ typed payload values.
//!
//! Encoding is deterministic: struct fields are written in declaration order
//! and payload maps are `BTreeMap`s, so the same value always yields the same
//! text. Decoding distinguishes text that is not JSON at all
//! (`MalformedPayload`) from JSON that does not fit the expected schema
//! (`SchemaMismatch`).

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{EventError, EventResult};

/// A typed payload of one event kind.
///
/// Implementors should use `#[serde(deny_unknown_fields)]` on record types so
/// that extra fields are reported as a schema mismatch.
pub trait PayloadSchema: Serialize + DeserializeOwned + Send + 'static {
    /// Human-readable schema name used in error messages.
    const SCHEMA: &'static str;
}

/// Serialize a payload to its wire text.
pub fn encode<P: PayloadSchema>(payload: &P) -> EventResult<String> {
    serde_json::to_string(payload).map_err(|e| EventError::schema_mismatch(P::SCHEMA, e.to_string()))
}

/// Deserialize wire text into the payload type of an event kind.
pub fn decode<P: PayloadSchema>(text: &str) -> EventResult<P> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| EventError::MalformedPayload {
            schema: P::SCHEMA,
            reason: e.to_string(),
        })?;

    serde_json::from_value(value).map_err(|e| EventError::schema_mismatch(P::SCHEMA, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Reading {
        sensor: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        tags: BTreeMap<String, String>,
    }

    impl PayloadSchema for Reading {
        const SCHEMA: &'static str = "Reading";
    }

    fn reading() -> Reading {
        let mut tags = BTreeMap::new();
        tags.insert("zone".to_string(), "kitchen".to_string());
        tags.insert("floor".to_string(), "1".to_string());
        Reading {
            sensor: "t1".into(),
            unit: None,
            tags,
        }
    }

    #[test]
    fn encode_is_stable_and_omits_absent_optionals() {
        let text = encode(&reading()).unwrap();
        assert_eq!(text, r#"{"sensor":"t1","tags":{"floor":"1","zone":"kitchen"}}"#);
        assert_eq!(encode(&reading()).unwrap(), text);
    }

    #[test]
    fn decode_inverts_encode() {
        let mut value = reading();
        value.unit = Some("°C".into());
        let decoded: Reading = decode(&encode(&value).unwrap()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn broken_text_is_malformed() {
        let err = decode::<Reading>(r#"{"sensor": "t1""#).unwrap_err();
        assert!(matches!(err, EventError::MalformedPayload { schema: "Reading", .. }));
    }

    #[test]
    fn missing_or_extra_fields_are_schema_mismatches() {
        let missing = decode::<Reading>(r#"{"sensor":"t1"}"#).unwrap_err();
        assert!(matches!(missing, EventError::SchemaMismatch { .. }));

        let extra = decode::<Reading>(r#"{"sensor":"t1","tags":{},"extra":1}"#).unwrap_err();
        assert!(matches!(extra, EventError::SchemaMismatch { .. }));

        let wrong_type = decode::<Reading>(r#"{"sensor":3,"tags":{}}"#).unwrap_err();
        assert!(matches!(wrong_type, EventError::SchemaMismatch { .. }));
    }
}
