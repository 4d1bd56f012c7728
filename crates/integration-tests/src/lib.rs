//! Integration test support for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! No external services are needed: [`FakeCatalogServer`] serves the catalog
//! endpoints from an in-process `axum` router on an ephemeral port.
//!
//! # Fake catalog behavior
//!
//! - `GET /products[?limit=N]` - every product, or the first N
//! - `GET /products/categories` - distinct categories in insertion order
//! - `GET /products/category/{name}` - products whose category matches
//! - `GET /products/{id}` - the product; unknown IDs get 200 with an empty
//!   body, IDs registered with [`FakeCatalog::failing`] get 500, and IDs
//!   registered with [`FakeCatalog::malformed`] get their raw payload

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use shopfront_storefront::config::CatalogConfig;
use tokio::task::JoinHandle;
use url::Url;

/// Catalog contents served by [`FakeCatalogServer`].
#[derive(Debug, Default)]
pub struct FakeCatalog {
    products: Vec<Value>,
    malformed: HashMap<i64, Value>,
    failing: HashSet<i64>,
    product_requests: AtomicUsize,
}

impl FakeCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product payload.
    #[must_use]
    pub fn product(mut self, payload: Value) -> Self {
        self.products.push(payload);
        self
    }

    /// Serve `payload` verbatim from `GET /products/{id}` only.
    #[must_use]
    pub fn malformed(mut self, id: i64, payload: Value) -> Self {
        self.malformed.insert(id, payload);
        self
    }

    /// Make `GET /products/{id}` answer 500 for this ID.
    #[must_use]
    pub fn failing(mut self, id: i64) -> Self {
        self.failing.insert(id);
        self
    }

    fn find(&self, id: i64) -> Option<&Value> {
        self.products
            .iter()
            .find(|p| p.get("id").and_then(Value::as_i64) == Some(id))
    }
}

/// A well-formed catalog product payload.
#[must_use]
pub fn product_json(id: i64, title: &str, price: f64, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{title} description"),
        "category": category,
        "image": format!("https://img.example/{id}.jpg"),
        "rating": { "rate": 4.2, "count": 10 }
    })
}

/// The standard sample catalog used across tests.
#[must_use]
pub fn sample_catalog() -> FakeCatalog {
    FakeCatalog::new()
        .product(product_json(1, "Backpack", 109.95, "men's clothing"))
        .product(product_json(2, "Slim T-Shirt", 22.3, "men's clothing"))
        .product(product_json(5, "Dragon Bracelet", 695.0, "jewelery"))
        .product(product_json(9, "Portable Drive", 64.0, "electronics"))
        .product(json!({
            "id": 7,
            "title": "Widget",
            "price": 9.99,
            "description": "A widget",
            "category": "electronics",
            "image": "u",
            "rating": { "rate": 3.6, "count": 4 }
        }))
        .malformed(13, json!({ "id": 13, "title": 13, "price": "n/a" }))
        .failing(50)
}

/// In-process catalog HTTP server.
pub struct FakeCatalogServer {
    base_url: Url,
    catalog: Arc<FakeCatalog>,
    handle: JoinHandle<()>,
}

impl FakeCatalogServer {
    /// Bind an ephemeral port and start serving `catalog`.
    pub async fn start(catalog: FakeCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/categories", get(list_categories))
            .route("/products/category/{name}", get(list_category))
            .route("/products/{id}", get(get_product))
            .with_state(Arc::clone(&catalog));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            catalog,
            handle,
        }
    }

    /// Base URL of the running server.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Catalog client configuration pointing at this server.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::new(self.base_url.clone())
    }

    /// Number of `GET /products/{id}` requests served so far.
    #[must_use]
    pub fn product_requests(&self) -> usize {
        self.catalog.product_requests.load(Ordering::SeqCst)
    }
}

impl Drop for FakeCatalogServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug, Deserialize)]
struct LimitParams {
    limit: Option<usize>,
}

async fn list_products(
    State(catalog): State<Arc<FakeCatalog>>,
    Query(params): Query<LimitParams>,
) -> Json<Vec<Value>> {
    let limit = params.limit.unwrap_or(usize::MAX);
    Json(catalog.products.iter().take(limit).cloned().collect())
}

async fn list_categories(State(catalog): State<Arc<FakeCatalog>>) -> Json<Vec<String>> {
    let mut categories: Vec<String> = Vec::new();
    for category in catalog
        .products
        .iter()
        .filter_map(|p| p.get("category").and_then(Value::as_str))
    {
        if !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }
    Json(categories)
}

async fn list_category(
    State(catalog): State<Arc<FakeCatalog>>,
    Path(name): Path<String>,
) -> Json<Vec<Value>> {
    Json(
        catalog
            .products
            .iter()
            .filter(|p| p.get("category").and_then(Value::as_str) == Some(name.as_str()))
            .cloned()
            .collect(),
    )
}

async fn get_product(
    State(catalog): State<Arc<FakeCatalog>>,
    Path(id): Path<String>,
) -> Response {
    catalog.product_requests.fetch_add(1, Ordering::SeqCst);

    let Ok(id) = id.parse::<i64>() else {
        return StatusCode::OK.into_response();
    };
    if catalog.failing.contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    if let Some(payload) = catalog.malformed.get(&id) {
        return Json(payload.clone()).into_response();
    }
    match catalog.find(id) {
        Some(product) => Json(product.clone()).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
