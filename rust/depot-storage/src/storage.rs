use std::sync::Arc;

use async_trait::async_trait;
use depot_common::ConditionalSync;

use crate::{DepotStorageError, Key};

mod memory;
pub use memory::*;

mod measure;
pub use measure::*;

#[cfg(not(target_arch = "wasm32"))]
mod fs;
#[cfg(not(target_arch = "wasm32"))]
pub use fs::*;

/// A [Storage] is a facade over some key/value substrate addressed by [Key].
///
/// A single instance is shared by every in-flight request, so all operations
/// take `&self` and implementations are expected to be safe for concurrent
/// invocation.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Storage: ConditionalSync {
    /// True if a value is stored against the given key
    async fn exists(&self, key: &Key) -> Result<bool, DepotStorageError>;

    /// Retrieve the value (if any) stored against the given key
    async fn value(&self, key: &Key) -> Result<Option<Vec<u8>>, DepotStorageError>;

    /// Store the given value against the given key, replacing any prior value
    async fn save(&self, key: Key, value: Vec<u8>) -> Result<(), DepotStorageError>;

    /// Remove the value stored against the given key. Fails with
    /// [DepotStorageError::NotFound] if there is none.
    async fn delete(&self, key: &Key) -> Result<(), DepotStorageError>;

    /// All keys under the given prefix, in ascending order
    async fn list(&self, prefix: &Key) -> Result<Vec<Key>, DepotStorageError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<S> Storage for Arc<S>
where
    S: Storage + ?Sized,
{
    async fn exists(&self, key: &Key) -> Result<bool, DepotStorageError> {
        (**self).exists(key).await
    }

    async fn value(&self, key: &Key) -> Result<Option<Vec<u8>>, DepotStorageError> {
        (**self).value(key).await
    }

    async fn save(&self, key: Key, value: Vec<u8>) -> Result<(), DepotStorageError> {
        (**self).save(key, value).await
    }

    async fn delete(&self, key: &Key) -> Result<(), DepotStorageError> {
        (**self).delete(key).await
    }

    async fn list(&self, prefix: &Key) -> Result<Vec<Key>, DepotStorageError> {
        (**self).list(prefix).await
    }
}
