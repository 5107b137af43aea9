//! Event type registry: type tag → (topic template, payload schema, constructor).
//!
//! The registry is filled once while the process starts and is read-only
//! afterwards. It has no interior mutability, so sharing it between threads
//! (directly or inside a factory behind an `Arc`) needs no locking.

use std::collections::BTreeMap;

use crate::codec::{self, PayloadSchema};
use crate::error::{EventError, EventResult};
use crate::event::EventMeta;
use crate::topic::{TopicBindings, TopicTemplate};

type Constructor<E> = Box<dyn Fn(EventMeta, &TopicBindings) -> EventResult<E> + Send + Sync>;

/// One registered event kind.
pub struct RegistryEntry<E> {
    event_type: &'static str,
    template: TopicTemplate,
    schema: &'static str,
    construct: Constructor<E>,
}

impl<E> RegistryEntry<E> {
    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    pub fn template(&self) -> &TopicTemplate {
        &self.template
    }

    /// Name of the payload schema this kind decodes.
    pub fn schema(&self) -> &'static str {
        self.schema
    }

    /// Decode `meta.payload` with this kind's schema and build the event.
    pub fn construct(&self, meta: EventMeta, bindings: &TopicBindings) -> EventResult<E> {
        (self.construct)(meta, bindings)
    }
}

impl<E> core::fmt::Debug for RegistryEntry<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("event_type", &self.event_type)
            .field("template", &self.template.pattern())
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Registry of event kinds producing events of type `E`.
pub struct EventRegistry<E> {
    entries: BTreeMap<&'static str, RegistryEntry<E>>,
}

impl<E> EventRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event kind.
    ///
    /// `constructor` receives the common event fields, the bindings parsed
    /// out of the topic and the decoded payload of schema `P`.
    pub fn register<P, F>(
        &mut self,
        event_type: &'static str,
        template: TopicTemplate,
        constructor: F,
    ) -> EventResult<()>
    where
        E: 'static,
        P: PayloadSchema,
        F: Fn(EventMeta, &TopicBindings, P) -> EventResult<E> + Send + Sync + 'static,
    {
        if self.entries.contains_key(event_type) {
            return Err(EventError::DuplicateTag(event_type.to_string()));
        }

        if let Some(existing) = self
            .entries
            .values()
            .find(|e| e.template.is_ambiguous_with(&template))
        {
            return Err(EventError::AmbiguousTemplate {
                template: template.pattern().to_string(),
                existing_type: existing.event_type.to_string(),
                existing_template: existing.template.pattern().to_string(),
            });
        }

        tracing::debug!(
            event_type,
            template = template.pattern(),
            schema = P::SCHEMA,
            "registered event type"
        );

        // Decode borrows the payload text; `meta` moves into the constructor after.
        let construct: Constructor<E> = Box::new(move |meta: EventMeta, bindings: &TopicBindings| {
            let payload = codec::decode::<P>(&meta.payload)?;
            constructor(meta, bindings, payload)
        });

        self.entries.insert(
            event_type,
            RegistryEntry {
                event_type,
                template,
                schema: P::SCHEMA,
                construct,
            },
        );
        Ok(())
    }

    pub fn lookup(&self, event_type: &str) -> EventResult<&RegistryEntry<E>> {
        self.entries
            .get(event_type)
            .ok_or_else(|| EventError::NotFound(event_type.to_string()))
    }

    /// Registered type tags, sorted.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for EventRegistry<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<E> core::fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.entries.values()).finish()
    }
}
