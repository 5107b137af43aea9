//! Topic catalog of thing events.

use hearth_events::{EventError, EventResult, TopicTemplate};

/// Prefix used when no configuration overrides it.
pub const DEFAULT_TOPIC_PREFIX: &str = "smarthome";

pub const THING_UID_PLACEHOLDER: &str = "thingUID";
pub const CHANNEL_UID_PLACEHOLDER: &str = "channelUID";

/// Parsed templates for every thing event kind under one prefix.
///
/// With the default prefix:
/// - status: `smarthome/things/{thingUID}/status`
/// - status changed: `smarthome/things/{thingUID}/statuschanged`
/// - added / removed / updated: `smarthome/things/{thingUID}/added|removed|updated`
/// - trigger: `smarthome/channels/{channelUID}/triggered`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThingTopics {
    pub status: TopicTemplate,
    pub status_changed: TopicTemplate,
    pub added: TopicTemplate,
    pub removed: TopicTemplate,
    pub updated: TopicTemplate,
    pub triggered: TopicTemplate,
}

impl ThingTopics {
    pub fn new(prefix: &str) -> EventResult<Self> {
        validate_prefix(prefix)?;

        let thing = |action: &str| {
            TopicTemplate::parse(&format!("{prefix}/things/{{{THING_UID_PLACEHOLDER}}}/{action}"))
        };

        Ok(Self {
            status: thing("status")?,
            status_changed: thing("statuschanged")?,
            added: thing("added")?,
            removed: thing("removed")?,
            updated: thing("updated")?,
            triggered: TopicTemplate::parse(&format!(
                "{prefix}/channels/{{{CHANNEL_UID_PLACEHOLDER}}}/triggered"
            ))?,
        })
    }
}

/// A prefix is one or more static topic segments.
pub fn validate_prefix(prefix: &str) -> EventResult<()> {
    let template = TopicTemplate::parse(prefix)?;
    if template.placeholders().next().is_some() {
        return Err(EventError::InvalidTemplate {
            template: prefix.to_string(),
            reason: "topic prefix must not contain placeholders".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog() {
        let topics = ThingTopics::new(DEFAULT_TOPIC_PREFIX).unwrap();
        assert_eq!(topics.status.pattern(), "smarthome/things/{thingUID}/status");
        assert_eq!(topics.status_changed.pattern(), "smarthome/things/{thingUID}/statuschanged");
        assert_eq!(topics.added.pattern(), "smarthome/things/{thingUID}/added");
        assert_eq!(topics.removed.pattern(), "smarthome/things/{thingUID}/removed");
        assert_eq!(topics.updated.pattern(), "smarthome/things/{thingUID}/updated");
        assert_eq!(topics.triggered.pattern(), "smarthome/channels/{channelUID}/triggered");
    }

    #[test]
    fn custom_prefix_may_span_segments() {
        let topics = ThingTopics::new("site-a/hub").unwrap();
        assert_eq!(topics.status.pattern(), "site-a/hub/things/{thingUID}/status");
    }

    #[test]
    fn invalid_prefixes_are_rejected() {
        for bad in ["", "a//b", "{x}", "a/", "pre{fix"] {
            assert!(
                matches!(ThingTopics::new(bad), Err(EventError::InvalidTemplate { .. })),
                "{bad:?}"
            );
        }
    }
}
