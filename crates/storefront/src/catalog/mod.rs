//! Product catalog access.
//!
//! # Architecture
//!
//! - [`Catalog`] is the seam the cart store and the CLI depend on
//! - [`CatalogClient`] implements it over the catalog's REST JSON API with `reqwest`
//! - In-memory caching via `moka` for catalog responses (5 minute TTL by default)
//!
//! # Endpoints
//!
//! - `GET /products` (optionally `?limit=N`) - all products
//! - `GET /products/{id}` - a single product
//! - `GET /products/categories` - category names
//! - `GET /products/category/{name}` - products in one category
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::catalog::{Catalog, CatalogClient};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//!
//! let trending = client.products(Some(3)).await?;
//! let product = client.product(ProductId::new(7)).await?;
//! ```

mod cache;
mod client;

pub use client::CatalogClient;

use async_trait::async_trait;
use shopfront_core::{Product, ProductId};
use thiserror::Error;

/// Pseudo-category meaning "every product".
pub const ALL_CATEGORIES: &str = "all";

/// Errors that can occur when fetching from the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog answered with a non-success status.
    #[error("Catalog returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog answered with an empty body.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A request URL could not be built.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Read access to the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch a single product.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch all products, or only the first `limit`.
    async fn products(&self, limit: Option<u32>) -> Result<Vec<Product>, CatalogError>;

    /// Fetch category names.
    async fn categories(&self) -> Result<Vec<String>, CatalogError>;

    /// Fetch products in one category.
    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError>;
}

/// Products for a category filter, where [`ALL_CATEGORIES`] means no filter.
///
/// # Errors
///
/// Propagates the catalog's error.
pub async fn products_for_category(
    catalog: &dyn Catalog,
    category: &str,
) -> Result<Vec<Product>, CatalogError> {
    if category == ALL_CATEGORIES {
        catalog.products(None).await
    } else {
        catalog.products_in_category(category).await
    }
}
