//! The cart state container.
//!
//! [`CartStore`] owns the ordered list of line items and keeps the persisted
//! snapshot in step with it. Every mutation:
//!
//! 1. waits for the write lock, restoring the snapshot first if
//!    [`CartStore::initialize`] has not run yet,
//! 2. updates the in-memory list and notifies subscribers,
//! 3. encodes the whole list while still holding the lock,
//! 4. writes the snapshot and releases the lock.
//!
//! Snapshots therefore reach storage in mutation order and always describe a
//! complete cart. If a write fails the in-memory list keeps the change; the
//! next successful write brings storage back in line.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use go_marketplace_core::{LineItem, LineItemId};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::snapshot;
use crate::storage::KeyValueStore;

/// Shopping cart backed by a [`KeyValueStore`].
///
/// Cheaply cloneable via `Arc`; construct one per process and hand clones to
/// every consumer.
pub struct CartStore<S> {
    inner: Arc<CartStoreInner<S>>,
}

struct CartStoreInner<S> {
    storage: S,
    config: CartConfig,
    products: watch::Sender<Vec<LineItem>>,
    /// Serializes mutations and their snapshot writes.
    write_lock: Mutex<()>,
    initialized: AtomicBool,
}

impl<S> Clone for CartStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create an empty cart.
    ///
    /// Call [`initialize`](Self::initialize) before handing the store out so
    /// the last snapshot is restored.
    #[must_use]
    pub fn new(storage: S, config: CartConfig) -> Self {
        let (products, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                config,
                products,
                write_lock: Mutex::new(()),
                initialized: AtomicBool::new(false),
            }),
        }
    }

    /// Restore the cart from the persisted snapshot.
    ///
    /// Returns the number of restored line items. Only the first call touches
    /// storage; later calls return the current line count. A mutation issued
    /// before this runs performs the restore itself, so the stored lines are
    /// never overwritten by a cart that has not seen them.
    ///
    /// # Errors
    ///
    /// Returns `CartError::StorageRead` if the snapshot cannot be read and
    /// `CartError::CorruptSnapshot` if it cannot be decoded. The cart stays
    /// empty in both cases.
    #[instrument(skip(self), fields(key = %self.inner.config.storage_key))]
    pub async fn initialize(&self) -> Result<usize> {
        let _guard = self.inner.write_lock.lock().await;

        if self.is_initialized() {
            debug!("Cart already initialized");
            return Ok(self.inner.products.borrow().len());
        }

        self.restore_locked().await
    }

    /// Load the snapshot into the cart. The caller must hold the write lock.
    ///
    /// The cart counts as initialized afterwards even when the snapshot could
    /// not be loaded.
    async fn restore_locked(&self) -> Result<usize> {
        self.inner.initialized.store(true, Ordering::Release);

        let key = &self.inner.config.storage_key;
        let stored = self
            .inner
            .storage
            .get(key)
            .await
            .map_err(|source| CartError::StorageRead {
                key: key.clone(),
                source,
            })
            .inspect_err(|e| warn!(error = %e, "Falling back to an empty cart"))?;

        let Some(bytes) = stored else {
            debug!("No cart snapshot stored, starting empty");
            return Ok(0);
        };

        let items = snapshot::decode(&bytes)
            .map_err(|source| CartError::CorruptSnapshot {
                key: key.clone(),
                source,
            })
            .inspect_err(|e| warn!(error = %e, "Falling back to an empty cart"))?;

        let count = items.len();
        self.inner.products.send_replace(items);
        info!(items = count, "Cart restored from snapshot");
        Ok(count)
    }

    /// Add a product to the cart.
    ///
    /// If a line matching `item` (per the configured [`MatchKey`]) is already
    /// in the cart its quantity grows by one and the other fields of `item`
    /// are ignored. Otherwise `item` is appended as given.
    ///
    /// [`MatchKey`]: crate::MatchKey
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOverflow` if the matching line is already
    /// at the maximum quantity, or a write error if the snapshot cannot be
    /// saved.
    #[instrument(skip(self, item), fields(id = %item.id, title = %item.title))]
    pub async fn add_to_cart(&self, item: LineItem) -> Result<()> {
        let match_key = self.inner.config.match_key;
        self.mutate(move |items| {
            let existing = items
                .iter_mut()
                .find(|existing| match_key.matches(existing, &item));
            if let Some(existing) = existing {
                bump(existing)
            } else {
                items.push(item);
                Ok(())
            }
        })
        .await
    }

    /// Add one unit to the line with this id.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if no line has this id; the cart and the
    /// snapshot are left untouched.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn increment(&self, id: &LineItemId) -> Result<()> {
        self.mutate(|items| {
            let index = position_of(items, id)?;
            items
                .get_mut(index)
                .map_or_else(|| Err(CartError::NotFound(id.clone())), bump)
        })
        .await
    }

    /// Remove one unit from the line with this id, dropping the line when its
    /// last unit goes.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if no line has this id; the cart and the
    /// snapshot are left untouched.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn decrement(&self, id: &LineItemId) -> Result<()> {
        self.mutate(|items| {
            let index = position_of(items, id)?;
            let Some(item) = items.get_mut(index) else {
                return Err(CartError::NotFound(id.clone()));
            };
            match item.quantity.decrement() {
                Some(quantity) => item.quantity = quantity,
                None => {
                    items.remove(index);
                    debug!("Line removed from cart");
                }
            }
            Ok(())
        })
        .await
    }

    /// Current line items, in cart order.
    #[must_use]
    pub fn products(&self) -> Vec<LineItem> {
        self.inner.products.borrow().clone()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.inner
            .products
            .borrow()
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Watch the line items. The receiver is notified after every change to
    /// the in-memory cart, including the restore done by `initialize`.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<LineItem>> {
        self.inner.products.subscribe()
    }

    /// Whether [`initialize`](Self::initialize) has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::Acquire)
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// Apply `apply` to the line items and persist the result.
    ///
    /// Subscribers are only notified, and storage only written, when `apply`
    /// succeeds. An uninitialized cart is restored first; if that restore
    /// fails the error is returned and `apply` does not run.
    async fn mutate<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<LineItem>) -> Result<()>,
    {
        let _guard = self.inner.write_lock.lock().await;

        if !self.is_initialized() {
            debug!("Mutation before initialize, restoring snapshot first");
            self.restore_locked().await?;
        }

        let mut outcome = Ok(Vec::new());
        self.inner.products.send_if_modified(|items| match apply(items) {
            Ok(()) => {
                outcome = snapshot::encode(items).map_err(CartError::Encode);
                true
            }
            Err(e) => {
                outcome = Err(e);
                false
            }
        });

        self.persist(outcome?).await
    }

    async fn persist(&self, bytes: Vec<u8>) -> Result<()> {
        let key = &self.inner.config.storage_key;
        let len = bytes.len();

        self.inner
            .storage
            .set(key, bytes)
            .await
            .map_err(|source| CartError::StorageWrite {
                key: key.clone(),
                source,
            })?;

        debug!(bytes = len, "Cart snapshot persisted");
        Ok(())
    }
}

fn position_of(items: &[LineItem], id: &LineItemId) -> Result<usize> {
    items
        .iter()
        .position(|item| &item.id == id)
        .ok_or_else(|| CartError::NotFound(id.clone()))
}

fn bump(item: &mut LineItem) -> Result<()> {
    item.quantity = item
        .quantity
        .checked_increment()
        .map_err(|source| CartError::QuantityOverflow {
            id: item.id.clone(),
            source,
        })?;
    Ok(())
}
