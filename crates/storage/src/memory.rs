use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use wechill_domain::StorageError;

use crate::{Backend, Key};

/// Keeps documents as JSON text in memory. Used where no browser storage exists.
#[derive(Debug, Default)]
pub struct Memory {
    entries: Mutex<BTreeMap<Key, String>>,
    unavailable: bool,
}

impl Memory {
    /// A backend that rejects every access, like a browser with storage disabled.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            entries: Mutex::default(),
            unavailable: true,
        }
    }

    pub fn insert_raw(&self, key: Key, text: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, text.to_string());
        }
    }

    #[must_use]
    pub fn raw(&self, key: Key) -> Option<String> {
        self.entries.lock().ok()?.get(&key).cloned()
    }

    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<Key, String>>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.entries.lock().map_err(|_| StorageError::Unavailable)
    }
}

impl Backend for Memory {
    fn read(&self, key: Key) -> Result<Option<serde_json::Value>, StorageError> {
        self.entries()?
            .get(&key)
            .map(|text| {
                serde_json::from_str(text).map_err(|err| StorageError::Malformed(err.to_string()))
            })
            .transpose()
    }

    fn write(&self, key: Key, value: &serde_json::Value) -> Result<(), StorageError> {
        self.entries()?.insert(key, value.to_string());
        Ok(())
    }
}
