//! Cart error types.
//!
//! Every failure the cart can produce is recoverable. [`CartError::kind`]
//! groups the variants into the handful of categories a UI reacts to.

use go_marketplace_core::{LineItemId, QuantityError};
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`CartStore`](crate::CartStore) operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The snapshot could not be read from storage.
    #[error("Failed to read cart snapshot {key}: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: StorageError,
    },

    /// The snapshot was read but is not a valid line item list.
    #[error("Cart snapshot {key} is corrupt: {source}")]
    CorruptSnapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot could not be written to storage.
    #[error("Failed to write cart snapshot {key}: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: StorageError,
    },

    /// The line items could not be encoded.
    #[error("Failed to encode cart snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// No line item with this id is in the cart.
    #[error("Line item not found: {0}")]
    NotFound(LineItemId),

    /// The line item's quantity cannot grow any further.
    #[error("Line item {id}: {source}")]
    QuantityOverflow {
        id: LineItemId,
        #[source]
        source: QuantityError,
    },
}

/// Category of a [`CartError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartErrorKind {
    /// Snapshot missing from or unreadable in storage. The cart falls back to empty.
    StorageRead,
    /// Snapshot could not be saved. The in-memory cart stays authoritative.
    StorageWrite,
    /// Operation referenced an id that is not in the cart.
    NotFound,
    /// Operation would put a line item into an invalid state.
    InvalidItem,
}

impl CartError {
    /// Get the category of this error.
    #[must_use]
    pub const fn kind(&self) -> CartErrorKind {
        match self {
            Self::StorageRead { .. } | Self::CorruptSnapshot { .. } => CartErrorKind::StorageRead,
            Self::StorageWrite { .. } | Self::Encode(_) => CartErrorKind::StorageWrite,
            Self::NotFound(_) => CartErrorKind::NotFound,
            Self::QuantityOverflow { .. } => CartErrorKind::InvalidItem,
        }
    }

    /// Whether the in-memory cart was left unchanged by the failed operation.
    ///
    /// Write failures happen after the in-memory update, so they return `false`.
    #[must_use]
    pub const fn state_unchanged(&self) -> bool {
        !matches!(self.kind(), CartErrorKind::StorageWrite)
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
