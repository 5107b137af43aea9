//! Runtime configuration of the thing event layer.

use serde::{Deserialize, Serialize};

use crate::topics::{DEFAULT_TOPIC_PREFIX, validate_prefix};

/// Environment variable overriding the topic prefix.
pub const TOPIC_PREFIX_ENV: &str = "HEARTH_TOPIC_PREFIX";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Leading static topic segment(s), e.g. "smarthome".
    pub topic_prefix: String,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            topic_prefix: DEFAULT_TOPIC_PREFIX.to_string(),
        }
    }
}

impl EventsConfig {
    /// Load from process environment (`HEARTH_TOPIC_PREFIX`).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup. Invalid values fall back to
    /// the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some(prefix) = lookup(TOPIC_PREFIX_ENV) else {
            return Self::default();
        };

        match validate_prefix(&prefix) {
            Ok(()) => Self {
                topic_prefix: prefix,
            },
            Err(err) => {
                tracing::warn!(%prefix, error = %err, "invalid {TOPIC_PREFIX_ENV}; using default");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_smarthome() {
        let config = EventsConfig::from_lookup(|_| None);
        assert_eq!(config.topic_prefix, "smarthome");
    }

    #[test]
    fn reads_prefix_override() {
        let config = EventsConfig::from_lookup(|key| {
            (key == TOPIC_PREFIX_ENV).then(|| "openhab".to_string())
        });
        assert_eq!(config.topic_prefix, "openhab");
    }

    #[test]
    fn invalid_prefix_falls_back() {
        let config = EventsConfig::from_lookup(|_| Some("bad//prefix".to_string()));
        assert_eq!(config, EventsConfig::default());
    }
}
