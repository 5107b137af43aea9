//! Minimal thing/channel domain values: enough to describe a device in a
//! snapshot payload.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use hearth_core::{ChannelUid, DomainError, DomainResult, Entity, ThingTypeUid, ThingUid};

/// Whether a channel carries state or fires trigger events.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelKind {
    #[default]
    State,
    Trigger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    uid: ChannelUid,
    kind: ChannelKind,
    channel_type_uid: Option<String>,
    item_type: Option<String>,
    label: Option<String>,
    description: Option<String>,
    default_tags: BTreeSet<String>,
    properties: BTreeMap<String, String>,
    configuration: BTreeMap<String, serde_json::Value>,
}

impl Channel {
    /// State channel accepting items of `item_type` (e.g. "Switch").
    pub fn state(uid: ChannelUid, item_type: impl Into<String>) -> Self {
        let mut channel = Self::bare(uid, ChannelKind::State);
        channel.item_type = Some(item_type.into());
        channel
    }

    /// Trigger channel (no item type).
    pub fn trigger(uid: ChannelUid) -> Self {
        Self::bare(uid, ChannelKind::Trigger)
    }

    fn bare(uid: ChannelUid, kind: ChannelKind) -> Self {
        Self {
            uid,
            kind,
            channel_type_uid: None,
            item_type: None,
            label: None,
            description: None,
            default_tags: BTreeSet::new(),
            properties: BTreeMap::new(),
            configuration: BTreeMap::new(),
        }
    }

    pub fn with_channel_type(mut self, channel_type_uid: impl Into<String>) -> Self {
        self.channel_type_uid = Some(channel_type_uid.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tags.insert(tag.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_configuration(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.configuration.insert(key.into(), value);
        self
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn channel_type_uid(&self) -> Option<&str> {
        self.channel_type_uid.as_deref()
    }

    pub fn item_type(&self) -> Option<&str> {
        self.item_type.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_tags(&self) -> &BTreeSet<String> {
        &self.default_tags
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn configuration(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.configuration
    }
}

impl Entity for Channel {
    type Id = ChannelUid;

    fn uid(&self) -> &Self::Id {
        &self.uid
    }
}

/// A device (or bridge) known to the system.
#[derive(Debug, Clone, PartialEq)]
pub struct Thing {
    uid: ThingUid,
    thing_type_uid: ThingTypeUid,
    bridge_uid: Option<ThingUid>,
    label: Option<String>,
    location: Option<String>,
    configuration: BTreeMap<String, serde_json::Value>,
    properties: BTreeMap<String, String>,
    channels: Vec<Channel>,
}

impl Thing {
    pub fn new(thing_type_uid: ThingTypeUid, uid: ThingUid) -> Self {
        Self {
            uid,
            thing_type_uid,
            bridge_uid: None,
            label: None,
            location: None,
            configuration: BTreeMap::new(),
            properties: BTreeMap::new(),
            channels: Vec::new(),
        }
    }

    pub fn with_bridge(mut self, bridge_uid: ThingUid) -> Self {
        self.bridge_uid = Some(bridge_uid);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_configuration(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.configuration.insert(key.into(), value);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Attach a channel; it must belong to this thing and have a unique id.
    pub fn with_channel(mut self, channel: Channel) -> DomainResult<Self> {
        if channel.uid.thing_uid() != self.uid {
            return Err(DomainError::validation(format!(
                "channel {} does not belong to thing {}",
                channel.uid, self.uid
            )));
        }
        if self.channels.iter().any(|c| c.uid == channel.uid) {
            return Err(DomainError::validation(format!(
                "duplicate channel {}",
                channel.uid
            )));
        }
        self.channels.push(channel);
        Ok(self)
    }

    pub fn thing_type_uid(&self) -> &ThingTypeUid {
        &self.thing_type_uid
    }

    pub fn bridge_uid(&self) -> Option<&ThingUid> {
        self.bridge_uid.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn configuration(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.configuration
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}

impl Entity for Thing {
    type Id = ThingUid;

    fn uid(&self) -> &Self::Id {
        &self.uid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thing_uid() -> ThingUid {
        "binding:type:id".parse().unwrap()
    }

    #[test]
    fn channels_must_belong_to_the_thing() {
        let thing = Thing::new("binding:type".parse().unwrap(), thing_uid());
        let foreign: ChannelUid = "binding:type:other:ch".parse().unwrap();

        let err = thing.clone().with_channel(Channel::trigger(foreign)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let own = ChannelUid::new(&thing_uid(), "ch").unwrap();
        let thing = thing.with_channel(Channel::trigger(own.clone())).unwrap();
        assert!(thing.with_channel(Channel::state(own, "Switch")).is_err());
    }

    #[test]
    fn thing_is_identified_by_uid() {
        let thing = Thing::new("binding:type".parse().unwrap(), thing_uid()).with_label("Lamp");
        assert_eq!(thing.uid(), &thing_uid());
        assert_eq!(thing.label(), Some("Lamp"));
    }
}
