use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{DepotStorageError, Key};

use super::Storage;

/// A trivial implementation of [Storage] - backed by a [BTreeMap] - where all
/// values are kept in memory and never persisted. Clones share the same
/// entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<BTreeMap<Key, Vec<u8>>>>,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Storage for MemoryStorage {
    async fn exists(&self, key: &Key) -> Result<bool, DepotStorageError> {
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn value(&self, key: &Key) -> Result<Option<Vec<u8>>, DepotStorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: Key, value: Vec<u8>) -> Result<(), DepotStorageError> {
        self.entries.write().await.insert(key, value);
        Ok(())
    }

    async fn delete(&self, key: &Key) -> Result<(), DepotStorageError> {
        match self.entries.write().await.remove(key) {
            Some(_) => Ok(()),
            None => Err(DepotStorageError::NotFound(key.clone())),
        }
    }

    async fn list(&self, prefix: &Key) -> Result<Vec<Key>, DepotStorageError> {
        let entries = self.entries.read().await;
        Ok(entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
