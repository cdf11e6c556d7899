use thiserror::Error;

use crate::Key;

/// The common error type used by this crate
#[derive(Error, Debug)]
pub enum DepotStorageError {
    /// The addressed key holds no value
    #[error("No value stored for key: {0}")]
    NotFound(Key),

    /// The key cannot be represented by the backend
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// An error that occurs when working with a storage backend
    #[error("Storage backend error: {0}")]
    StorageBackend(String),
}
