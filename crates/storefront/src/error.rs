//! Unified error handling for the storefront library.
//!
//! Provides an `AppError` type covering every failure a front end can see
//! while setting up or driving the storefront.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Durable storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

impl AppError {
    /// Message suitable for showing to a shopper.
    ///
    /// Internal details stay in the logs.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::Storage(_) => "The storefront is misconfigured.",
            Self::Catalog(CatalogError::NotFound(_)) => "Product not found.",
            Self::Catalog(_) => "Failed to load products. Please try again later.",
            Self::Cart(CartError::CatalogFetch { .. }) => {
                "Failed to add product. Please try again."
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use shopfront_core::ProductId;

    use super::*;

    #[test]
    fn test_cart_fetch_failure_message() {
        let err = AppError::from(CartError::CatalogFetch {
            product_id: ProductId::new(99),
            source: CatalogError::RateLimited(1),
        });
        assert_eq!(err.user_message(), "Failed to add product. Please try again.");
        assert!(err.to_string().contains("Failed to fetch product 99"));
    }

    #[test]
    fn test_catalog_not_found_message() {
        let err = AppError::from(CatalogError::NotFound("products/5".to_string()));
        assert_eq!(err.user_message(), "Product not found.");
    }
}
