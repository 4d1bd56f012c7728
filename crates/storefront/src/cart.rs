//! Cart store.
//!
//! [`CartStore`] owns the authoritative in-memory [`Cart`] for a session and
//! mirrors it into durable storage after every mutation. Storage is read
//! exactly once, when the store is initialized.
//!
//! # Concurrency
//!
//! Adds for different products may await the catalog concurrently. The cart
//! itself sits behind a mutex that is only held for the synchronous
//! mutate-and-persist step, never across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_core::{Cart, CartLineItem, CartStateError, ProductId};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product could not be fetched from the catalog; the cart is unchanged.
    #[error("Failed to fetch product {product_id}: {source}")]
    CatalogFetch {
        product_id: ProductId,
        #[source]
        source: CatalogError,
    },
}

/// Why the persisted cart could not be restored.
#[derive(Debug, Error)]
enum PersistedStateError {
    #[error("Persisted cart is corrupt: {0}")]
    Corrupt(#[from] CartStateError),

    #[error("Persisted cart could not be read: {0}")]
    Storage(#[from] StorageError),
}

/// Shared handle to a session's cart.
///
/// Cheap to clone; clones operate on the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    cart: Mutex<Cart>,
    catalog: Arc<dyn Catalog>,
    storage: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Load the cart from durable storage.
    ///
    /// Missing, unreadable, or corrupt data yields an empty cart; this never
    /// fails.
    #[must_use]
    pub fn initialize(catalog: Arc<dyn Catalog>, storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = match load_persisted(storage.as_ref()) {
            Ok(Some(cart)) => {
                debug!(lines = cart.len(), "Restored persisted cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Discarding persisted cart, starting empty");
                Cart::new()
            }
        };

        Self {
            inner: Arc::new(CartStoreInner {
                cart: Mutex::new(cart),
                catalog,
                storage,
            }),
        }
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its quantity bumped without
    /// contacting the catalog. Otherwise the product is fetched and appended
    /// with quantity 1. The snapshot fields of an existing line are never
    /// refreshed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CatalogFetch` if the product could not be fetched.
    /// The cart is left unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_item(&self, product_id: ProductId) -> Result<CartLineItem, CartError> {
        {
            let mut cart = self.lock();
            if let Some(line) = cart.increment(product_id).cloned() {
                self.persist(&cart);
                info!(quantity = line.quantity, "Incremented cart line");
                return Ok(line);
            }
        }

        let product = self
            .inner
            .catalog
            .product(product_id)
            .await
            .map_err(|source| {
                warn!(error = %source, "Catalog fetch failed, cart unchanged");
                CartError::CatalogFetch { product_id, source }
            })?;

        // Another add of the same product may have landed while we awaited
        // the catalog; add_product merges into that line if so.
        let mut cart = self.lock();
        let line = cart.add_product(&product).clone();
        self.persist(&cart);
        info!(quantity = line.quantity, "Added product to cart");
        Ok(line)
    }

    /// Remove a product's line.
    ///
    /// Always succeeds; removing an absent product is a no-op. Returns the
    /// removed line, if there was one.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_item(&self, product_id: ProductId) -> Option<CartLineItem> {
        let mut cart = self.lock();
        let removed = cart.remove(product_id);
        self.persist(&cart);
        info!(removed = removed.is_some(), "Removed product from cart");
        removed
    }

    /// Sum of quantities across all lines; 0 for an empty cart.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lock().total_quantity()
    }

    /// Snapshot of the cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLineItem> {
        self.lock().items().to_vec()
    }

    /// Snapshot of the whole cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Mirror the cart into storage.
    ///
    /// The in-memory cart stays authoritative, so a failed write is logged
    /// and not propagated.
    fn persist(&self, cart: &Cart) {
        if let Err(e) = self.inner.storage.set(CART_STORAGE_KEY, &cart.to_json()) {
            tracing::error!(error = %e, "Failed to persist cart");
        }
    }
}

fn load_persisted(storage: &dyn KeyValueStore) -> Result<Option<Cart>, PersistedStateError> {
    let Some(raw) = storage.get(CART_STORAGE_KEY)? else {
        return Ok(None);
    };
    Ok(Some(Cart::from_json(&raw)?))
}
