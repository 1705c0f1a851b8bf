//! Key-value storage for cart snapshots.
//!
//! The cart only ever needs two operations: read the blob stored under a key
//! and replace it. Backends implement [`KeyValueStore`]; the cart decides what
//! the bytes mean.
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map, lost on exit (tests, previews)
//! - [`FileStore`] - One file per key under a data directory

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backend could not service the request.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A persistent string-keyed blob store.
///
/// Implementations must make `set` atomic per key: a concurrent or later `get`
/// observes either the previous value or the new one, never a mix.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored under the key.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<S: KeyValueStore> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StorageError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).set(key, value)
    }
}
