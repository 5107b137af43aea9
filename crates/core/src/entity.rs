//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Things and channels are entities: two snapshots with the same UID describe
/// the same device, even when every other field differs.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn uid(&self) -> &Self::Id;
}
