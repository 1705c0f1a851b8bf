//! File-backed key-value store.
//!
//! Each key maps to `<root>/<url-encoded key>.json`. Writes go to a sibling
//! temporary file that is flushed to disk and then renamed over the target;
//! on Unix the directory is synced as well so the rename itself is durable.
//! A crash at any point leaves either the previous or the new snapshot.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::instrument;

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] that keeps one file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is created on the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", urlencoding::encode(key)))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `value` to `path` and wait until it is on disk.
async fn write_synced(path: &Path, value: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(value).await?;
    file.sync_all().await
}

#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::File::open(dir).await?.sync_all().await
}

// Directories cannot be opened as files on other platforms.
#[cfg(not(unix))]
#[allow(clippy::unused_async)]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error(&self.root, e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        write_synced(&tmp, &value)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error(&path, e))?;
        sync_dir(&self.root)
            .await
            .map_err(|e| io_error(&self.root, e))?;

        Ok(())
    }
}
