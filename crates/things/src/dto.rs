//! Serialization contract for thing snapshots carried in added/removed/updated
//! payloads.
//!
//! Field names follow the established wire format (`UID`, `thingTypeUID`,
//! `bridgeUID`, ...). Absent optionals are omitted; maps are sorted.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use hearth_core::{ChannelUid, Entity, ThingTypeUid, ThingUid};
use hearth_events::PayloadSchema;

use crate::thing::{Channel, ChannelKind, Thing};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelDto {
    pub uid: ChannelUid,
    pub id: String,
    #[serde(rename = "channelTypeUID", default, skip_serializing_if = "Option::is_none")]
    pub channel_type_uid: Option<String>,
    #[serde(rename = "itemType", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub kind: ChannelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "defaultTags", default)]
    pub default_tags: BTreeSet<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub configuration: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThingDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "bridgeUID", default, skip_serializing_if = "Option::is_none")]
    pub bridge_uid: Option<ThingUid>,
    #[serde(default)]
    pub configuration: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(rename = "UID")]
    pub uid: ThingUid,
    #[serde(rename = "thingTypeUID")]
    pub thing_type_uid: ThingTypeUid,
    #[serde(default)]
    pub channels: Vec<ChannelDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl PayloadSchema for ThingDto {
    const SCHEMA: &'static str = "ThingDTO";
}

/// `[new, old]` pair carried by thing-updated events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThingDtoChange(pub ThingDto, pub ThingDto);

impl PayloadSchema for ThingDtoChange {
    const SCHEMA: &'static str = "[ThingDTO, ThingDTO]";
}

impl From<&Channel> for ChannelDto {
    fn from(channel: &Channel) -> Self {
        Self {
            uid: channel.uid().clone(),
            id: channel.uid().id().to_string(),
            channel_type_uid: channel.channel_type_uid().map(str::to_string),
            item_type: channel.item_type().map(str::to_string),
            kind: channel.kind(),
            label: channel.label().map(str::to_string),
            description: channel.description().map(str::to_string),
            default_tags: channel.default_tags().clone(),
            properties: channel.properties().clone(),
            configuration: channel.configuration().clone(),
        }
    }
}

impl From<&Thing> for ThingDto {
    fn from(thing: &Thing) -> Self {
        Self {
            label: thing.label().map(str::to_string),
            bridge_uid: thing.bridge_uid().cloned(),
            configuration: thing.configuration().clone(),
            properties: thing.properties().clone(),
            uid: thing.uid().clone(),
            thing_type_uid: thing.thing_type_uid().clone(),
            channels: thing.channels().iter().map(ChannelDto::from).collect(),
            location: thing.location().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_events::{EventError, codec};
    use serde_json::json;

    fn thing() -> Thing {
        let uid: ThingUid = "binding:type:id".parse().unwrap();
        Thing::new("binding:type".parse().unwrap(), uid.clone())
            .with_label("Hall switch")
            .with_configuration("pollingInterval", json!(30))
            .with_channel(
                Channel::trigger(ChannelUid::new(&uid, "button").unwrap())
                    .with_channel_type("binding:button")
                    .with_tag("Switch"),
            )
            .unwrap()
    }

    #[test]
    fn minimal_thing_snapshot() {
        let uid: ThingUid = "binding:type:id".parse().unwrap();
        let dto = ThingDto::from(&Thing::new("binding:type".parse().unwrap(), uid));
        assert_eq!(
            codec::encode(&dto).unwrap(),
            r#"{"configuration":{},"properties":{},"UID":"binding:type:id","thingTypeUID":"binding:type","channels":[]}"#
        );
    }

    #[test]
    fn snapshot_round_trips() {
        let dto = ThingDto::from(&thing());
        assert_eq!(dto.channels[0].id, "button");
        assert_eq!(dto.channels[0].kind, ChannelKind::Trigger);

        let text = codec::encode(&dto).unwrap();
        assert_eq!(codec::decode::<ThingDto>(&text).unwrap(), dto);
    }

    #[test]
    fn snapshot_requires_uid() {
        let err = codec::decode::<ThingDto>(r#"{"thingTypeUID":"binding:type"}"#).unwrap_err();
        assert!(matches!(err, EventError::SchemaMismatch { schema: "ThingDTO", .. }));

        let bad_uid =
            codec::decode::<ThingDto>(r#"{"UID":"nope","thingTypeUID":"binding:type"}"#).unwrap_err();
        assert!(matches!(bad_uid, EventError::SchemaMismatch { .. }));
    }
}
