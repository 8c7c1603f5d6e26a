use gloo_storage::{Storage as _, errors::StorageError as GlooStorageError};
use wechill_domain::StorageError;

use crate::{Backend, Key};

/// The browser's `localStorage`.
pub struct LocalStorage;

impl LocalStorage {
    /// Storage can be missing or disabled, e.g. in private browsing modes.
    fn ensure_available() -> Result<(), StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .map(|_| ())
            .ok_or(StorageError::Unavailable)
    }
}

impl Backend for LocalStorage {
    fn read(&self, key: Key) -> Result<Option<serde_json::Value>, StorageError> {
        Self::ensure_available()?;
        match gloo_storage::LocalStorage::get(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) => match err {
                GlooStorageError::KeyNotFound(_) => Ok(None),
                GlooStorageError::SerdeError(err) => Err(StorageError::Malformed(err.to_string())),
                err => Err(StorageError::Other(Box::new(err))),
            },
        }
    }

    fn write(&self, key: Key, value: &serde_json::Value) -> Result<(), StorageError> {
        Self::ensure_available()?;
        gloo_storage::LocalStorage::set(key, value).map_err(|err| StorageError::Other(Box::new(err)))
    }
}
