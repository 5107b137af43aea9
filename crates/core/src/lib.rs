//! `hearth-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no event or transport
//! concerns): identifiers of things and channels, and the entity/value
//! object vocabulary used by the domain crates.

pub mod entity;
pub mod error;
pub mod uid;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use uid::{ChannelUid, ThingTypeUid, ThingUid};
pub use value_object::ValueObject;
