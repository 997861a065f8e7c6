//! Init-once lookup table from event type names to their descriptors.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::catalog;
use crate::catalog::DeserializedEvent;
use crate::schema::EventTypeDescriptor;

/// Builds the typed event from a document the descriptor walk has already
/// conformed. Infallible in practice for registered catalog shapes; the error
/// type exists so entries stay plain function pointers.
pub type DecodeFn = fn(Value) -> Result<DeserializedEvent, serde_json::Error>;

pub struct RegistryEntry {
    descriptor: EventTypeDescriptor,
    decode: DecodeFn,
}

impl RegistryEntry {
    pub fn new(descriptor: EventTypeDescriptor, decode: DecodeFn) -> Self {
        Self { descriptor, decode }
    }

    pub fn descriptor(&self) -> &EventTypeDescriptor {
        &self.descriptor
    }

    pub(crate) fn decode(&self, value: Value) -> Result<DeserializedEvent, serde_json::Error> {
        (self.decode)(value)
    }
}

/// Registration happens once per type at startup; lookups are read-only for
/// the life of the process, so shared references need no locking.
#[derive(Default)]
pub struct EventRegistry {
    entries: HashMap<&'static str, RegistryEntry>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering the same type name twice replaces the earlier entry.
    pub fn register(&mut self, entry: RegistryEntry) {
        self.entries.insert(entry.descriptor.type_name(), entry);
    }

    pub fn lookup(&self, type_name: &str) -> Option<&RegistryEntry> {
        self.entries.get(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

static DEFAULT_REGISTRY: Lazy<EventRegistry> = Lazy::new(|| {
    let mut registry = EventRegistry::new();
    registry.register(catalog::http_api::request_entry());
    registry.register(catalog::http_api::response_entry());
    registry.register(catalog::object_storage::entry());
    registry.register(catalog::batch_job::entry());
    registry
});

/// The process-wide registry holding the built-in catalog.
pub fn default_registry() -> &'static EventRegistry {
    &DEFAULT_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{batch_job, http_api, object_storage};

    #[test]
    fn default_registry_holds_the_catalog() {
        let registry = default_registry();
        for name in [
            http_api::HTTP_API_REQUEST,
            http_api::HTTP_API_RESPONSE,
            object_storage::OBJECT_STORAGE_LAMBDA,
            batch_job::BATCH_JOB_STATE_CHANGE,
        ] {
            let entry = registry.lookup(name).expect(name);
            assert_eq!(entry.descriptor().type_name(), name);
        }
        assert_eq!(registry.type_names().count(), 4);
    }

    #[test]
    fn lookup_misses_unregistered_names() {
        assert!(default_registry().lookup("QueueMessage").is_none());
    }

    #[test]
    fn re_registration_replaces_the_entry() {
        let mut registry = EventRegistry::new();
        registry.register(http_api::request_entry());
        registry.register(http_api::request_entry());
        assert_eq!(registry.type_names().count(), 1);
    }
}
