//! Application state shared across UI handlers.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::{Catalog, CatalogClient};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::storage::{FileStore, KeyValueStore};

/// Application state for one shopping session.
///
/// This struct is cheaply cloneable via `Arc` and hands the catalog and the
/// session's cart store to whichever handler needs them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn Catalog>,
    cart: CartStore,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Builds the HTTP catalog client, opens the file store under
    /// `config.data_dir`, and restores the cart from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the data
    /// directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let catalog: Arc<dyn Catalog> = Arc::new(CatalogClient::new(&config.catalog)?);
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.data_dir)?);
        Ok(Self::with_parts(config, catalog, storage))
    }

    /// Create application state from explicit collaborators.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: Arc<dyn Catalog>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let cart = CartStore::initialize(Arc::clone(&catalog), storage);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.inner.catalog.as_ref()
    }

    /// Get a reference to the session's cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}
