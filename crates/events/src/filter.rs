//! Subscriber-side event filters.

use crate::error::EventResult;
use crate::event::Event;
use crate::topic::TopicTemplate;

/// Decides whether a subscriber sees an event.
pub trait EventFilter<E>: Send + Sync {
    fn apply(&self, event: &E) -> bool;
}

/// Accepts events whose topic fits a pattern.
///
/// The pattern uses template syntax; both `{name}` and `*` segments match any
/// single non-empty segment, e.g. `smarthome/things/*/status`.
#[derive(Debug, Clone)]
pub struct TopicEventFilter {
    template: TopicTemplate,
}

impl TopicEventFilter {
    pub fn new(pattern: &str) -> EventResult<Self> {
        let normalized = pattern
            .split('/')
            .enumerate()
            .map(|(i, segment)| {
                if segment == "*" {
                    format!("{{*{i}}}")
                } else {
                    segment.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("/");

        Ok(Self {
            template: TopicTemplate::parse(&normalized)?,
        })
    }

    pub fn matches(&self, topic: &str) -> bool {
        self.template.match_topic(topic).is_some()
    }
}

impl<E: Event> EventFilter<E> for TopicEventFilter {
    fn apply(&self, event: &E) -> bool {
        self.matches(event.topic())
    }
}

/// Rejects events that were emitted by `own_source`, so a component does not
/// react to its own publications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    own_source: String,
}

impl SourceFilter {
    pub fn new(own_source: impl Into<String>) -> Self {
        Self {
            own_source: own_source.into(),
        }
    }
}

impl<E: Event> EventFilter<E> for SourceFilter {
    fn apply(&self, event: &E) -> bool {
        event.source() != Some(self.own_source.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventMeta;

    #[derive(Debug, Clone)]
    struct Probe(EventMeta);

    impl Event for Probe {
        fn event_type(&self) -> &'static str {
            "Probe"
        }

        fn meta(&self) -> &EventMeta {
            &self.0
        }
    }

    fn probe(topic: &str, source: Option<&str>) -> Probe {
        Probe(EventMeta::new(topic, "{}", source))
    }

    #[test]
    fn topic_filter_accepts_wildcards() {
        let filter = TopicEventFilter::new("smarthome/things/*/status").unwrap();
        assert!(filter.apply(&probe("smarthome/things/binding:type:id/status", None)));
        assert!(!filter.apply(&probe("smarthome/things/binding:type:id/added", None)));

        let named = TopicEventFilter::new("smarthome/{kind}/*/added").unwrap();
        assert!(named.apply(&probe("smarthome/things/a:b:c/added", None)));
    }

    #[test]
    fn topic_filter_rejects_bad_patterns() {
        assert!(TopicEventFilter::new("a//b").is_err());
    }

    #[test]
    fn source_filter_drops_own_emissions() {
        let filter = SourceFilter::new("me");
        assert!(!filter.apply(&probe("t", Some("me"))));
        assert!(filter.apply(&probe("t", Some("you"))));
        assert!(filter.apply(&probe("t", None)));
    }
}
