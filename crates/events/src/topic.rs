//! Topic templates: render and parse `/`-delimited topics with named
//! placeholders.
//!
//! A template such as `smarthome/things/{thingUID}/status` is a sequence of
//! segments. Each segment is either literal text or exactly one placeholder.
//! Matching is structural (segment by segment), never regex based, which
//! keeps it unambiguous and makes template collisions checkable up front.

use core::str::FromStr;
use std::collections::BTreeMap;

use crate::error::{EventError, EventResult};

/// Delimiter between topic segments.
pub const TOPIC_SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Placeholder(String),
}

/// Placeholder name → bound identifier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicBindings(BTreeMap<String, String>);

impl TopicBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(placeholder, value);
        self
    }

    pub fn insert(&mut self, placeholder: impl Into<String>, value: impl Into<String>) {
        self.0.insert(placeholder.into(), value.into());
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.0.get(placeholder).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A parsed topic template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTemplate {
    pattern: String,
    segments: Vec<Segment>,
}

impl TopicTemplate {
    /// Parse a template pattern.
    ///
    /// Rejects empty segments, braces outside of a whole-segment placeholder,
    /// empty placeholder names and duplicate placeholder names.
    pub fn parse(pattern: &str) -> EventResult<Self> {
        if pattern.is_empty() {
            return Err(EventError::invalid_template(pattern, "empty pattern"));
        }

        let mut segments = Vec::new();
        for raw in pattern.split(TOPIC_SEPARATOR) {
            if raw.is_empty() {
                return Err(EventError::invalid_template(pattern, "empty segment"));
            }

            let segment = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    if name.is_empty() || name.contains(['{', '}']) {
                        return Err(EventError::invalid_template(
                            pattern,
                            format!("bad placeholder '{raw}'"),
                        ));
                    }
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Placeholder(n) if n == name))
                    {
                        return Err(EventError::invalid_template(
                            pattern,
                            format!("duplicate placeholder '{name}'"),
                        ));
                    }
                    Segment::Placeholder(name.to_string())
                }
                None => {
                    if raw.contains(['{', '}']) {
                        return Err(EventError::invalid_template(
                            pattern,
                            format!("stray brace in segment '{raw}'"),
                        ));
                    }
                    Segment::Static(raw.to_string())
                }
            };
            segments.push(segment);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Placeholder names in segment order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Substitute every placeholder with its bound value.
    ///
    /// Bindings without a matching placeholder are ignored.
    pub fn render(&self, bindings: &TopicBindings) -> EventResult<String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => parts.push(text.as_str()),
                Segment::Placeholder(name) => {
                    let value = bindings.get(name).ok_or_else(|| EventError::MissingBinding {
                        placeholder: name.clone(),
                        template: self.pattern.clone(),
                    })?;
                    if !is_valid_segment_value(value) {
                        return Err(EventError::InvalidIdentifier {
                            placeholder: name.clone(),
                            value: value.to_string(),
                        });
                    }
                    parts.push(value);
                }
            }
        }
        Ok(parts.join("/"))
    }

    /// Parse a concrete topic against this template.
    ///
    /// Returns `None` when the segment count or any static segment differs,
    /// or when a placeholder segment is empty.
    pub fn match_topic(&self, topic: &str) -> Option<TopicBindings> {
        let parts: Vec<&str> = topic.split(TOPIC_SEPARATOR).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut bindings = TopicBindings::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(text) if text == part => {}
                Segment::Static(_) => return None,
                Segment::Placeholder(_) if part.is_empty() => return None,
                Segment::Placeholder(name) => bindings.insert(name.clone(), part),
            }
        }
        Some(bindings)
    }

    /// Two templates are ambiguous when some concrete topic matches both,
    /// i.e. they have the same number of segments and every pair of
    /// segments is either equal static text or involves a placeholder.
    pub fn is_ambiguous_with(&self, other: &TopicTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a == b,
                    _ => true,
                })
    }
}

fn is_valid_segment_value(value: &str) -> bool {
    !value.is_empty() && !value.contains(TOPIC_SEPARATOR)
}

impl FromStr for TopicTemplate {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for TopicTemplate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STATUS: &str = "smarthome/things/{thingUID}/status";

    fn template(pattern: &str) -> TopicTemplate {
        TopicTemplate::parse(pattern).unwrap()
    }

    #[test]
    fn render_substitutes_only_the_placeholder() {
        let bindings = TopicBindings::new().with("thingUID", "binding:type:id");
        let topic = template(STATUS).render(&bindings).unwrap();
        assert_eq!(topic, "smarthome/things/binding:type:id/status");
    }

    #[test]
    fn render_requires_every_binding() {
        let err = template(STATUS).render(&TopicBindings::new()).unwrap_err();
        assert_eq!(
            err,
            EventError::MissingBinding {
                placeholder: "thingUID".into(),
                template: STATUS.into(),
            }
        );
    }

    #[test]
    fn render_rejects_values_that_would_split_the_topic() {
        for bad in ["a/b", ""] {
            let bindings = TopicBindings::new().with("thingUID", bad);
            let err = template(STATUS).render(&bindings).unwrap_err();
            assert!(matches!(err, EventError::InvalidIdentifier { .. }), "{bad:?}");
        }
    }

    #[test]
    fn match_extracts_bindings() {
        let bindings = template("a/{x}/b/{y}").match_topic("a/1:2/b/3").unwrap();
        assert_eq!(bindings.get("x"), Some("1:2"));
        assert_eq!(bindings.get("y"), Some("3"));
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn match_is_structural() {
        let t = template(STATUS);
        assert!(t.match_topic("totally/wrong/topic").is_none());
        assert!(t.match_topic("smarthome/things/x/added").is_none());
        assert!(t.match_topic("smarthome/things//status").is_none());
        assert!(t.match_topic("smarthome/things/a/b/status").is_none());
        assert!(t.match_topic("smarthome/things/x/status/").is_none());
    }

    #[test]
    fn parse_rejects_malformed_patterns() {
        for bad in ["", "a//b", "a/{}/b", "a/{x}/{x}", "a/b{x}", "a/{x/b", "/a"] {
            assert!(
                matches!(TopicTemplate::parse(bad), Err(EventError::InvalidTemplate { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn ambiguity_detection() {
        let status = template(STATUS);
        assert!(status.is_ambiguous_with(&template("smarthome/things/{other}/status")));
        assert!(status.is_ambiguous_with(&template("smarthome/{kind}/{id}/status")));
        assert!(!status.is_ambiguous_with(&template("smarthome/things/{thingUID}/added")));
        assert!(!status.is_ambiguous_with(&template("smarthome/things/{thingUID}")));
    }

    #[test]
    fn placeholders_are_listed_in_order() {
        let t = template("a/{first}/b/{second}");
        assert_eq!(t.placeholders().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(t.to_string(), "a/{first}/b/{second}");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: whatever renders also matches, yielding the same bindings.
        #[test]
        fn rendered_topics_match_back(
            thing in "[A-Za-z0-9_:#-]{1,24}",
            channel in "[A-Za-z0-9_:#-]{1,24}",
        ) {
            let t = template("root/{thing}/mid/{channel}/leaf");
            let bindings = TopicBindings::new().with("thing", thing).with("channel", channel);
            let topic = t.render(&bindings).unwrap();
            prop_assert_eq!(t.match_topic(&topic), Some(bindings));
        }
    }
}
