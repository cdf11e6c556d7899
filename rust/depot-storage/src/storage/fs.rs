use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{DepotStorageError, Key, SEPARATOR};

use super::Storage;

/// A basic file-system-based [Storage] implementation. Every value is a file
/// inside a root directory; key segments become nested directories.
#[derive(Clone, Debug)]
pub struct FileSystemStorage {
    root_dir: PathBuf,
}

fn backend_error(error: std::io::Error) -> DepotStorageError {
    DepotStorageError::StorageBackend(format!("{error}"))
}

impl FileSystemStorage {
    /// Creates a new [`FileSystemStorage`] that stores files in `root_dir`.
    pub async fn new<Pathlike>(root_dir: Pathlike) -> Result<Self, DepotStorageError>
    where
        Pathlike: AsRef<Path>,
    {
        let root_dir = root_dir.as_ref().to_owned();
        tokio::fs::create_dir_all(&root_dir)
            .await
            .map_err(backend_error)?;
        Ok(Self { root_dir })
    }

    /// The directory this storage keeps its files in.
    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Resolves a key to a path below the root. Keys that could escape the
    /// root or that have no segments are rejected.
    fn make_path(&self, key: &Key) -> Result<PathBuf, DepotStorageError> {
        let mut path = self.root_dir.clone();
        for part in key.as_str().split(SEPARATOR) {
            if part.is_empty() || part == "." || part == ".." || part.contains('\\') {
                return Err(DepotStorageError::InvalidKey(key.to_string()));
            }
            path.push(part);
        }
        Ok(path)
    }

    /// Like [Self::make_path], except the empty key resolves to the root.
    fn make_prefix_path(&self, prefix: &Key) -> Result<PathBuf, DepotStorageError> {
        if prefix.parts().next().is_none() {
            Ok(self.root_dir.clone())
        } else {
            self.make_path(&Key::from(prefix.parts().collect::<Vec<_>>().join("/")))
        }
    }
}

#[async_trait]
impl Storage for FileSystemStorage {
    async fn exists(&self, key: &Key) -> Result<bool, DepotStorageError> {
        match tokio::fs::metadata(self.make_path(key)?).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(backend_error(error)),
        }
    }

    async fn value(&self, key: &Key) -> Result<Option<Vec<u8>>, DepotStorageError> {
        match tokio::fs::read(self.make_path(key)?).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(backend_error(error)),
        }
    }

    async fn save(&self, key: Key, value: Vec<u8>) -> Result<(), DepotStorageError> {
        let path = self.make_path(&key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(backend_error)?;
        }
        tokio::fs::write(path, value).await.map_err(backend_error)
    }

    async fn delete(&self, key: &Key) -> Result<(), DepotStorageError> {
        match tokio::fs::remove_file(self.make_path(key)?).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(DepotStorageError::NotFound(key.clone()))
            }
            Err(error) => Err(backend_error(error)),
        }
    }

    async fn list(&self, prefix: &Key) -> Result<Vec<Key>, DepotStorageError> {
        let start = self.make_prefix_path(prefix)?;
        let mut keys = Vec::new();
        let mut pending = vec![start];

        while let Some(directory) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&directory).await {
                Ok(entries) => entries,
                Err(error) if error.kind() == ErrorKind::NotFound => continue,
                Err(error) => return Err(backend_error(error)),
            };

            while let Some(entry) = entries.next_entry().await.map_err(backend_error)? {
                let file_type = entry.file_type().await.map_err(backend_error)?;
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() {
                    let Ok(relative) = path.strip_prefix(&self.root_dir) else {
                        continue;
                    };
                    let parts = relative
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>();
                    keys.push(Key::from(parts.join("/")));
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
