//! Catalog REST client implementation.
//!
//! Uses `reqwest` for HTTP and validates every payload against the
//! [`Product`] schema. Caches responses using `moka` (configurable TTL).

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shopfront_core::{Product, ProductId};
use tracing::{debug, instrument};
use url::Url;

use super::cache::{CacheKey, CacheValue};
use super::{Catalog, CatalogError};
use crate::config::CatalogConfig;

/// Number of body characters included in error logs.
const LOG_BODY_CHARS: usize = 500;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        let client = reqwest::Client::builder()
            .user_agent(concat!("shopfront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: with_trailing_slash(config.base_url.clone()),
                cache,
            }),
        })
    }

    /// The catalog base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let mut url = self.inner.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        debug!(url = %url, "Catalog request");
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path,
                body = %truncate(&body),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        // The catalog answers unknown IDs with 200 and an empty body
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        serde_json::from_str(trimmed).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                body = %truncate(&body),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found, the request fails, or
    /// the payload is not a valid product.
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("products/{id}"), &[]).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn products(&self, limit: Option<u32>) -> Result<Vec<Product>, CatalogError> {
        let cache_key = CacheKey::Products { limit };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let query: Vec<(&str, String)> = limit
            .map(|n| vec![("limit", n.to_string())])
            .unwrap_or_default();
        let products: Vec<Product> = self.get_json("products", &query).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<String> = self.get_json("products/categories", &[]).await?;

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let cache_key = CacheKey::Category(category.to_string());

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(products);
        }

        let path = format!("products/category/{}", urlencoding::encode(category));
        let products: Vec<Product> = self.get_json(&path, &[]).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }
}

/// Ensure relative joins append to the base path instead of replacing its last segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_with_trailing_slash_root() {
        let url = with_trailing_slash(Url::parse("https://fakestoreapi.com").unwrap());
        assert_eq!(url.as_str(), "https://fakestoreapi.com/");
    }

    #[test]
    fn test_with_trailing_slash_keeps_prefix() {
        let url = with_trailing_slash(Url::parse("http://localhost:8080/api").unwrap());
        assert_eq!(
            url.join("products/categories").unwrap().as_str(),
            "http://localhost:8080/api/products/categories"
        );
    }

    #[test]
    fn test_category_path_is_encoded() {
        let base = with_trailing_slash(Url::parse("https://fakestoreapi.com").unwrap());
        let path = format!(
            "products/category/{}",
            urlencoding::encode("men's clothing")
        );
        assert_eq!(
            base.join(&path).unwrap().as_str(),
            "https://fakestoreapi.com/products/category/men%27s%20clothing"
        );
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "x".repeat(LOG_BODY_CHARS + 10);
        assert_eq!(truncate(&body).len(), LOG_BODY_CHARS);
    }
}
