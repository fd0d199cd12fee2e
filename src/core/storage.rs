//! Persisted wallet bookkeeping.
//!
//! The only persisted value is the last successfully activated connector,
//! kept under [`CONNECTOR_ID_KEY`] for reconnect-on-reload. Its absence is
//! never an error.

use crate::config::CONNECTOR_ID_KEY;
use crate::core::connector::ConnectorKind;
use crate::core::error::StorageError;
use crate::utils::dom;

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        dom::local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        dom::local_storage()
            .ok_or(StorageError::Unavailable)?
            .set_item(key, value)
            .map_err(|_| StorageError::SaveFailed)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        dom::local_storage()
            .ok_or(StorageError::Unavailable)?
            .remove_item(key)
            .map_err(|_| StorageError::RemoveFailed)
    }
}

/// Last connector that activated successfully, if any and still recognised.
pub fn last_connector(store: &impl KeyValueStore) -> Option<ConnectorKind> {
    store
        .get(CONNECTOR_ID_KEY)
        .and_then(|id| ConnectorKind::from_storage_id(&id))
}

/// Remember `kind` as the last successful connector.
pub fn remember_connector(
    store: &impl KeyValueStore,
    kind: ConnectorKind,
) -> Result<(), StorageError> {
    store.set(CONNECTOR_ID_KEY, kind.storage_id())
}

/// Drop the remembered connector.
pub fn forget_connector(store: &impl KeyValueStore) -> Result<(), StorageError> {
    store.remove(CONNECTOR_ID_KEY)
}

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory store standing in for localStorage in tests.
    #[derive(Default)]
    pub struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }
}
