#![warn(clippy::pedantic)]

use chrono::Utc;
use log::debug;
use strum::AsRefStr;
use wechill_domain::{self as domain, StorageError, StoreRepository};

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
pub mod migration;
pub mod record;

/// A synchronous key-value store holding JSON documents.
pub trait Backend {
    /// Returns `Ok(None)` if nothing is stored under the key.
    fn read(&self, key: Key) -> Result<Option<serde_json::Value>, StorageError>;
    fn write(&self, key: Key, value: &serde_json::Value) -> Result<(), StorageError>;
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    #[strum(serialize = "we-chill.templates.v1")]
    Templates,
    #[strum(serialize = "we-chill.log")]
    Log,
}

/// Persists the template store as a single JSON document.
pub struct TemplateStore<B> {
    backend: B,
}

impl<B: Backend> TemplateStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn seed(&self) -> domain::Store {
        let store = domain::Store::seeded(Utc::now());
        if let Err(err) = self.save_store(&store) {
            debug!("failed to save seeded templates: {err}");
        }
        store
    }
}

impl<B: Backend> StoreRepository for TemplateStore<B> {
    fn load_store(&self) -> domain::Store {
        match self.backend.read(Key::Templates) {
            Ok(Some(value)) => migration::normalize(&value),
            Ok(None) => {
                debug!("no stored templates, using seed data");
                self.seed()
            }
            Err(StorageError::Malformed(err)) => {
                debug!("stored templates are unreadable, using seed data: {err}");
                self.seed()
            }
            Err(err) => {
                debug!("failed to read templates, using seed data: {err}");
                self.seed()
            }
        }
    }

    fn save_store(&self, store: &domain::Store) -> Result<(), StorageError> {
        let value = serde_json::to_value(record::Store::from(store))
            .map_err(|err| StorageError::Other(Box::new(err)))?;
        self.backend.write(Key::Templates, &value)
    }
}

#[cfg(test)]
mod tests {
    pub mod data;

    use pretty_assertions::assert_eq;

    use crate::memory::Memory;

    use super::*;
    use data::{STORE, STORE_JSON};

    #[test]
    fn test_key_names() {
        assert_eq!(Key::Templates.as_ref(), "we-chill.templates.v1");
        assert_eq!(Key::Log.as_ref(), "we-chill.log");
    }

    #[test]
    fn test_load_seeds_empty_storage() {
        let store = TemplateStore::new(Memory::default());
        let loaded = store.load_store();
        assert_eq!(loaded.users(), vec!["Anton", "August"]);
        let stored = store.backend.read(Key::Templates).unwrap().unwrap();
        assert_eq!(
            record::Store::from(&migration::normalize(&stored)),
            record::Store::from(&loaded)
        );
    }

    #[test]
    fn test_load_seeds_malformed_storage() {
        let memory = Memory::default();
        memory.insert_raw(Key::Templates, "{not json");
        let store = TemplateStore::new(memory);
        assert_eq!(store.load_store().users(), vec!["Anton", "August"]);
        assert!(store.backend.read(Key::Templates).is_ok());
    }

    #[test]
    fn test_load_seeds_unavailable_storage() {
        let store = TemplateStore::new(Memory::unavailable());
        assert_eq!(store.load_store().templates("August").len(), 3);
    }

    #[test]
    fn test_load_normalizes_stored_data() {
        let memory = Memory::default();
        memory.write(Key::Templates, &STORE_JSON).unwrap();
        let store = TemplateStore::new(memory);
        assert_eq!(store.load_store(), *STORE);
    }

    #[test]
    fn test_save_store() {
        let store = TemplateStore::new(Memory::default());
        store.save_store(&STORE).unwrap();
        assert_eq!(
            store.backend.read(Key::Templates).unwrap(),
            Some(STORE_JSON.clone())
        );
        assert_eq!(store.load_store(), *STORE);
    }

    #[test]
    fn test_save_store_unavailable() {
        let store = TemplateStore::new(Memory::unavailable());
        assert!(matches!(
            store.save_store(&STORE),
            Err(StorageError::Unavailable)
        ));
    }
}
