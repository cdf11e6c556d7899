use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{DepotStorageError, Key};

use super::Storage;

/// A [MeasuredStorage] acts as a proxy over a [Storage] implementation that
/// counts the operations performed against it.
#[derive(Debug, Default)]
pub struct MeasuredStorage<Backend>
where
    Backend: Storage,
{
    checks: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
    deletes: AtomicUsize,
    backend: Backend,
}

impl<Backend> MeasuredStorage<Backend>
where
    Backend: Storage,
{
    /// Wrap the provided [Storage] so that operations against it may be
    /// measured.
    pub fn new(backend: Backend) -> Self {
        Self {
            checks: AtomicUsize::default(),
            reads: AtomicUsize::default(),
            writes: AtomicUsize::default(),
            deletes: AtomicUsize::default(),
            backend,
        }
    }

    /// The aggregate number of existence checks
    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::Relaxed)
    }

    /// The aggregate number of value reads and listings
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// The aggregate number of saves
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// The aggregate number of delete attempts, failed ones included
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::Relaxed)
    }

    /// The wrapped [Storage]
    pub fn backend(&self) -> &Backend {
        &self.backend
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Backend> Storage for MeasuredStorage<Backend>
where
    Backend: Storage,
{
    async fn exists(&self, key: &Key) -> Result<bool, DepotStorageError> {
        self.checks.fetch_add(1, Ordering::Relaxed);
        self.backend.exists(key).await
    }

    async fn value(&self, key: &Key) -> Result<Option<Vec<u8>>, DepotStorageError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.backend.value(key).await
    }

    async fn save(&self, key: Key, value: Vec<u8>) -> Result<(), DepotStorageError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.backend.save(key, value).await
    }

    async fn delete(&self, key: &Key) -> Result<(), DepotStorageError> {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.backend.delete(key).await
    }

    async fn list(&self, prefix: &Key) -> Result<Vec<Key>, DepotStorageError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.backend.list(prefix).await
    }
}
