//! Strongly-typed identifiers of things and channels.
//!
//! All UIDs share one textual shape: `:`-separated segments, where each
//! segment is a non-empty run of ASCII alphanumerics, `_` or `-`.
//!
//! - `ThingTypeUid`: `binding:type`
//! - `ThingUid`: `binding:type[:bridge...]:id`
//! - `ChannelUid`: `binding:type[:bridge...]:thing:channel` (the channel id may
//!   carry a group as `group#channel`)

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Separator between UID segments.
pub const SEPARATOR: char = ':';

/// Separator between channel group and channel id inside the last segment.
pub const CHANNEL_GROUP_SEPARATOR: char = '#';

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn validate_segment(kind: &str, segment: &str) -> DomainResult<()> {
    if segment.is_empty() || !segment.chars().all(is_segment_char) {
        return Err(DomainError::invalid_id(format!(
            "{kind}: invalid segment '{segment}'"
        )));
    }
    Ok(())
}

fn validate_channel_id(kind: &str, id: &str) -> DomainResult<()> {
    match id.split_once(CHANNEL_GROUP_SEPARATOR) {
        Some((group, channel)) => {
            validate_segment(kind, group)?;
            validate_segment(kind, channel)
        }
        None => validate_segment(kind, id),
    }
}

fn split_checked<'a>(kind: &str, value: &'a str, min_segments: usize) -> DomainResult<Vec<&'a str>> {
    let segments: Vec<&str> = value.split(SEPARATOR).collect();
    if segments.len() < min_segments {
        return Err(DomainError::invalid_id(format!(
            "{kind}: '{value}' needs at least {min_segments} segments, found {}",
            segments.len()
        )));
    }
    Ok(segments)
}

/// Identifier of a thing type (`binding:type`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThingTypeUid(String);

/// Identifier of a thing (`binding:type[:bridge...]:id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThingUid(String);

/// Identifier of a channel (`<thing uid>:channel`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelUid(String);

impl ThingTypeUid {
    pub fn new(binding_id: &str, thing_type_id: &str) -> DomainResult<Self> {
        Self::parse(&format!("{binding_id}{SEPARATOR}{thing_type_id}"))
    }

    fn parse(value: &str) -> DomainResult<Self> {
        let segments = split_checked("ThingTypeUid", value, 2)?;
        if segments.len() != 2 {
            return Err(DomainError::invalid_id(format!(
                "ThingTypeUid: '{value}' must have exactly 2 segments"
            )));
        }
        for s in &segments {
            validate_segment("ThingTypeUid", s)?;
        }
        Ok(Self(value.to_string()))
    }

    pub fn binding_id(&self) -> &str {
        self.segment(0)
    }

    pub fn id(&self) -> &str {
        self.segment(1)
    }

    fn segment(&self, index: usize) -> &str {
        self.0.split(SEPARATOR).nth(index).unwrap_or_default()
    }
}

impl ThingUid {
    /// Thing directly below its binding.
    pub fn new(thing_type: &ThingTypeUid, id: &str) -> DomainResult<Self> {
        Self::parse(&format!("{thing_type}{SEPARATOR}{id}"))
    }

    /// Thing attached to a bridge; the bridge path is embedded between the
    /// thing type and the thing id.
    pub fn with_bridge(thing_type: &ThingTypeUid, bridge: &ThingUid, id: &str) -> DomainResult<Self> {
        let mut segments = vec![thing_type.binding_id(), thing_type.id()];
        segments.extend(bridge.bridge_ids());
        segments.push(bridge.id());
        segments.push(id);
        Self::parse(&segments.join(":"))
    }

    fn parse(value: &str) -> DomainResult<Self> {
        for s in split_checked("ThingUid", value, 3)? {
            validate_segment("ThingUid", s)?;
        }
        Ok(Self(value.to_string()))
    }

    pub fn binding_id(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    pub fn thing_type_id(&self) -> &str {
        self.segments().nth(1).unwrap_or_default()
    }

    pub fn thing_type_uid(&self) -> ThingTypeUid {
        ThingTypeUid(format!("{}{SEPARATOR}{}", self.binding_id(), self.thing_type_id()))
    }

    /// Bridge ids between the thing type and the thing id, outermost first.
    pub fn bridge_ids(&self) -> Vec<&str> {
        let segments: Vec<&str> = self.segments().collect();
        segments[2..segments.len() - 1].to_vec()
    }

    pub fn id(&self) -> &str {
        self.segments().next_back().unwrap_or_default()
    }

    fn segments(&self) -> core::str::Split<'_, char> {
        self.0.split(SEPARATOR)
    }
}

impl ChannelUid {
    pub fn new(thing: &ThingUid, id: &str) -> DomainResult<Self> {
        Self::parse(&format!("{thing}{SEPARATOR}{id}"))
    }

    fn parse(value: &str) -> DomainResult<Self> {
        let segments = split_checked("ChannelUid", value, 4)?;
        let (id, thing) = segments
            .split_last()
            .ok_or_else(|| DomainError::invalid_id("ChannelUid: empty"))?;
        for s in thing {
            validate_segment("ChannelUid", s)?;
        }
        validate_channel_id("ChannelUid", id)?;
        Ok(Self(value.to_string()))
    }

    pub fn thing_uid(&self) -> ThingUid {
        let (thing, _) = self.split();
        ThingUid(thing.to_string())
    }

    /// Channel id including an optional group prefix (`group#channel`).
    pub fn id(&self) -> &str {
        self.split().1
    }

    pub fn id_without_group(&self) -> &str {
        let id = self.id();
        id.split_once(CHANNEL_GROUP_SEPARATOR)
            .map_or(id, |(_, channel)| channel)
    }

    pub fn group_id(&self) -> Option<&str> {
        self.id()
            .split_once(CHANNEL_GROUP_SEPARATOR)
            .map(|(group, _)| group)
    }

    fn split(&self) -> (&str, &str) {
        self.0.rsplit_once(SEPARATOR).unwrap_or(("", &self.0))
    }
}

macro_rules! impl_uid_string {
    ($t:ty) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_uid_string!(ThingTypeUid);
impl_uid_string!(ThingUid);
impl_uid_string!(ChannelUid);
