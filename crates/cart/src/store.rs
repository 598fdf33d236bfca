//! The cart store: authoritative in-memory state and the four operations.
//!
//! Mutations run on the caller's task and are serialized by a mutex with
//! short critical sections. Each mutation computes the post-mutation list,
//! hands that exact value to a background writer task, then publishes it on
//! a watch channel. Callers never await persistence; the in-memory state is
//! authoritative for the session and the persisted copy may lag.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument, warn};

use go_marketplace_core::{CartItem, Price, ProductId};

use crate::config::{self, CartConfig};
use crate::error::Result;
use crate::storage::{FileStorage, SnapshotStorage, StorageError};

/// Work items for the background snapshot writer.
enum WriterMessage {
    /// Persist this exact snapshot.
    Persist(Vec<CartItem>),
    /// Acknowledge once every previously queued write has completed.
    Flush(oneshot::Sender<()>),
}

/// The cart store handle.
///
/// Cheaply cloneable via `Arc`; hand a clone to every component that needs
/// the cart instead of reaching for ambient state. All clones share one
/// authoritative item list.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    config: CartConfig,
    state: Mutex<Vec<CartItem>>,
    publisher: watch::Sender<Vec<CartItem>>,
    writer: mpsc::UnboundedSender<WriterMessage>,
}

impl CartStore {
    /// Open the cart store: validate the configuration, perform the one-time
    /// snapshot load, and start the background writer.
    ///
    /// A snapshot that cannot be read or deserialized is discarded with a
    /// warning and the cart starts empty. Stored entries that violate the
    /// cart invariants (zero quantity, duplicate id) are dropped
    /// individually.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Config` if the storage key is invalid. Storage
    /// problems during the load are not errors; see above.
    #[instrument(skip(config, storage), fields(storage_key = %config.storage_key))]
    pub async fn open(config: CartConfig, storage: Arc<dyn SnapshotStorage>) -> Result<Self> {
        // Holds for hand-built configs too, not just `CartConfig::new`.
        config::validate_storage_key(&config.storage_key)?;

        let items = load_snapshot(storage.as_ref(), &config.storage_key).await;
        debug!(items = items.len(), "Cart store opened");

        let (writer, writer_rx) = mpsc::unbounded_channel();
        let (publisher, _) = watch::channel(items.clone());
        tokio::spawn(run_writer(storage, config.storage_key.clone(), writer_rx));

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                config,
                state: Mutex::new(items),
                publisher,
                writer,
            }),
        })
    }

    /// Open a store persisted to files under `config.storage_dir`.
    ///
    /// Convenience over [`CartStore::open`] for the common device setup;
    /// inject a custom [`SnapshotStorage`] through `open` instead when
    /// embedding.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Config` if the storage key is invalid.
    pub async fn open_file_backed(config: CartConfig) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        Self::open(config, storage).await
    }

    /// Get a reference to the store configuration.
    #[must_use]
    pub fn config(&self) -> &CartConfig {
        &self.inner.config
    }

    /// Add a product to the cart.
    ///
    /// A product not yet in the cart is appended with quantity 1; the
    /// caller-supplied quantity is ignored. Adding a product already in the
    /// cart bumps its quantity by one and refreshes title, price, and image
    /// from the new item, since catalog data may have changed since the
    /// first add.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub fn add_to_cart(&self, item: CartItem) {
        let snapshot = {
            let mut state = self.lock_state();
            match state.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    let quantity = existing.quantity.saturating_add(1);
                    *existing = CartItem { quantity, ..item };
                }
                None => state.push(CartItem { quantity: 1, ..item }),
            }
            state.clone()
        };
        self.commit(snapshot);
    }

    /// Increase the quantity of the product with `id` by one.
    ///
    /// Silently does nothing if the product is not in the cart.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn increment(&self, id: &ProductId) {
        let snapshot = {
            let mut state = self.lock_state();
            let Some(existing) = state.iter_mut().find(|item| item.id == *id) else {
                debug!("Increment for product not in cart; ignoring");
                return;
            };
            existing.quantity = existing.quantity.saturating_add(1);
            state.clone()
        };
        self.commit(snapshot);
    }

    /// Decrease the quantity of the product with `id` by one, removing the
    /// item when its quantity reaches zero.
    ///
    /// Silently does nothing if the product is not in the cart.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn decrement(&self, id: &ProductId) {
        let snapshot = {
            let mut state = self.lock_state();
            let Some(existing) = state.iter_mut().find(|item| item.id == *id) else {
                debug!("Decrement for product not in cart; ignoring");
                return;
            };
            existing.quantity = existing.quantity.saturating_sub(1);
            state.retain(|item| item.quantity > 0);
            state.clone()
        };
        self.commit(snapshot);
    }

    /// Current cart contents, in first-add order.
    #[must_use]
    pub fn products(&self) -> Vec<CartItem> {
        self.lock_state().clone()
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock_state().iter().map(|item| item.quantity).sum()
    }

    /// Sum of `price × quantity` over all items.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lock_state().iter().map(CartItem::line_total).sum()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver starts at the current state and sees every subsequent
    /// mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.inner.publisher.subscribe()
    }

    /// Wait until every write queued so far has been handed to storage.
    ///
    /// The four operations never await persistence; this exists for
    /// shutdown paths and tests.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.inner.writer.send(WriterMessage::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Queue the snapshot for persistence, then publish it.
    ///
    /// The writer receives the exact post-mutation value, so a stale list
    /// can never reach storage regardless of task timing.
    fn commit(&self, snapshot: Vec<CartItem>) {
        if self
            .inner
            .writer
            .send(WriterMessage::Persist(snapshot.clone()))
            .is_err()
        {
            warn!("Snapshot writer is gone; cart changes will not be persisted");
        }
        let _ = self.inner.publisher.send_replace(snapshot);
    }

    fn lock_state(&self) -> MutexGuard<'_, Vec<CartItem>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// One-time load of the persisted snapshot.
///
/// Read failures and corrupt snapshots degrade to an empty cart instead of
/// failing construction.
async fn load_snapshot(storage: &dyn SnapshotStorage, key: &str) -> Vec<CartItem> {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read cart snapshot; starting with an empty cart");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CartItem>>(&raw) {
        Ok(items) => sanitize_entries(items),
        Err(e) => {
            let corruption = StorageError::DataCorruption(e.to_string());
            warn!(error = %corruption, "Discarding undeserializable cart snapshot");
            Vec::new()
        }
    }
}

/// Drop stored entries that violate the cart invariants.
fn sanitize_entries(raw: Vec<CartItem>) -> Vec<CartItem> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(raw.len());
    for item in raw {
        if let Err(e) = ProductId::parse(item.id.as_str()) {
            warn!(error = %e, "Dropping stored cart entry with malformed id");
            continue;
        }
        if item.quantity == 0 {
            warn!(product_id = %item.id, "Dropping stored cart entry with zero quantity");
            continue;
        }
        if !seen.insert(item.id.clone()) {
            warn!(product_id = %item.id, "Dropping stored cart entry with duplicate id");
            continue;
        }
        items.push(item);
    }
    items
}

/// Background writer: applies queued snapshots to storage in send order.
///
/// A failed write is logged and skipped; the in-memory state remains
/// authoritative and the next mutation queues a fresh snapshot.
async fn run_writer(
    storage: Arc<dyn SnapshotStorage>,
    key: String,
    mut messages: mpsc::UnboundedReceiver<WriterMessage>,
) {
    while let Some(message) = messages.recv().await {
        match message {
            WriterMessage::Persist(snapshot) => {
                if let Err(e) = persist_snapshot(storage.as_ref(), &key, &snapshot).await {
                    warn!(error = %e, "Failed to persist cart snapshot");
                }
            }
            WriterMessage::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

async fn persist_snapshot(
    storage: &dyn SnapshotStorage,
    key: &str,
    snapshot: &[CartItem],
) -> std::result::Result<(), StorageError> {
    let value = serde_json::to_string(snapshot)?;
    storage.set(key, &value).await
}
