//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: a status info reporting
/// `OFFLINE / COMMUNICATION_ERROR` is equal to any other status info with the
/// same fields. Event payloads are built from value objects, which is what
/// makes field-for-field comparison of a built event and a re-parsed event
/// meaningful.
///
/// The trait requires:
/// - **Clone**: values are copied into events and snapshots
/// - **PartialEq**: values are compared by their attributes
/// - **Debug**: values show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
