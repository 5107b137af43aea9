use crate::filter::EventFilter;

/// Subscribe to every event type.
pub const ALL_EVENT_TYPES: &str = "ALL";

/// Receives typed events from an `EventDispatcher`.
///
/// `receive` takes `&self`; subscribers that keep state use interior
/// mutability. Delivery happens on the dispatching thread.
pub trait EventSubscriber<E>: Send + Sync {
    /// Type tags this subscriber wants, or `[ALL_EVENT_TYPES]`.
    fn subscribed_event_types(&self) -> Vec<&'static str>;

    /// Optional additional filter applied after the type check.
    fn event_filter(&self) -> Option<&dyn EventFilter<E>> {
        None
    }

    fn receive(&self, event: &E);
}
