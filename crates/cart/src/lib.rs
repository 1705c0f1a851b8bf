//! Go Marketplace Cart - Persisted shopping cart state container.
//!
//! Holds the cart's line items in memory and writes a full snapshot of them to
//! a key-value store after every change, so the cart survives restarts.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the in-memory line items and is the only writer of the
//!   snapshot. It is constructed once and cloned into every consumer.
//! - [`KeyValueStore`] is the storage seam. [`MemoryStore`] and [`FileStore`]
//!   are the bundled backends.
//! - [`snapshot`] encodes the line items as the JSON array the mobile app
//!   reads and writes.
//!
//! # Example
//!
//! ```rust
//! use go_marketplace_cart::{CartConfig, CartStore, MemoryStore};
//! use go_marketplace_core::{LineItem, Price};
//!
//! # async fn demo() -> go_marketplace_cart::Result<()> {
//! let cart = CartStore::new(MemoryStore::new(), CartConfig::default());
//! cart.initialize().await?;
//!
//! let shirt = LineItem::new("1", "Shirt", "https://img/1.png", Price::from_cents(1990));
//! cart.add_to_cart(shirt).await?;
//! cart.increment(&"1".into()).await?;
//!
//! assert_eq!(cart.item_count(), 2);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError, DEFAULT_STORAGE_KEY, MatchKey};
pub use error::{CartError, CartErrorKind, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::CartStore;
