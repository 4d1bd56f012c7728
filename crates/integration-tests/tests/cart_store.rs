//! End-to-end cart store tests: HTTP catalog client plus file-backed storage.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use shopfront_core::{Cart, CartLineItem, Price, ProductId};
use shopfront_integration_tests::{FakeCatalogServer, sample_catalog};
use shopfront_storefront::cart::CART_STORAGE_KEY;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::{
    AppState, CartError, CartStore, Catalog, CatalogClient, CatalogError, FileStore, KeyValueStore,
};
use tempfile::TempDir;

struct Session {
    server: FakeCatalogServer,
    data_dir: TempDir,
}

impl Session {
    async fn start() -> Self {
        Self {
            server: FakeCatalogServer::start(sample_catalog()).await,
            data_dir: tempfile::tempdir().unwrap(),
        }
    }

    fn open_store(&self) -> CartStore {
        let catalog = Arc::new(CatalogClient::new(&self.server.config()).unwrap());
        let storage = Arc::new(FileStore::open(self.data_dir.path()).unwrap());
        CartStore::initialize(catalog, storage)
    }

    fn cart_file(&self) -> PathBuf {
        self.data_dir.path().join(format!("{CART_STORAGE_KEY}.json"))
    }
}

#[tokio::test]
async fn test_first_add_fetches_and_persists() {
    let session = Session::start().await;
    let store = session.open_store();

    let line = store.add_item(ProductId::new(7)).await.unwrap();

    assert_eq!(
        line,
        CartLineItem {
            id: ProductId::new(7),
            title: "Widget".to_string(),
            price: Price::from_cents(999),
            image: "u".to_string(),
            quantity: 1,
        }
    );
    assert_eq!(store.total_item_count(), 1);
    assert_eq!(session.server.product_requests(), 1);

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(session.cart_file()).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        serde_json::json!([
            { "id": 7, "title": "Widget", "price": 9.99, "image": "u", "quantity": 1 }
        ])
    );
}

#[tokio::test]
async fn test_repeat_add_across_sessions_does_not_fetch() {
    let session = Session::start().await;
    session
        .open_store()
        .add_item(ProductId::new(7))
        .await
        .unwrap();

    // A new session has a cold catalog cache, so any fetch would hit the server
    let store = session.open_store();
    let line = store.add_item(ProductId::new(7)).await.unwrap();

    assert_eq!(line.quantity, 2);
    assert_eq!(store.items().len(), 1);
    assert_eq!(session.server.product_requests(), 1);
}

#[tokio::test]
async fn test_session_round_trip() {
    let session = Session::start().await;
    let store = session.open_store();
    for id in [1, 9, 1, 5] {
        store.add_item(ProductId::new(id)).await.unwrap();
    }
    store.remove_item(ProductId::new(9));
    let before = store.snapshot();

    let reopened = session.open_store();

    assert_eq!(reopened.snapshot(), before);
    assert_eq!(reopened.total_item_count(), 3);
}

#[tokio::test]
async fn test_failed_fetches_leave_cart_and_file_unchanged() {
    let session = Session::start().await;
    let store = session.open_store();
    store.add_item(ProductId::new(1)).await.unwrap();
    let before = std::fs::read_to_string(session.cart_file()).unwrap();

    let not_found = store.add_item(ProductId::new(99)).await.unwrap_err();
    let server_error = store.add_item(ProductId::new(50)).await.unwrap_err();
    let malformed = store.add_item(ProductId::new(13)).await.unwrap_err();

    assert!(matches!(
        not_found,
        CartError::CatalogFetch { source: CatalogError::NotFound(_), .. }
    ));
    assert!(matches!(
        server_error,
        CartError::CatalogFetch { source: CatalogError::Status { status: 500, .. }, .. }
    ));
    assert!(matches!(
        malformed,
        CartError::CatalogFetch { source: CatalogError::Parse(_), .. }
    ));
    assert_eq!(store.total_item_count(), 1);
    assert_eq!(std::fs::read_to_string(session.cart_file()).unwrap(), before);
}

#[tokio::test]
async fn test_corrupt_file_starts_empty_and_is_overwritten() {
    let session = Session::start().await;
    std::fs::write(session.cart_file(), "{not json").unwrap();

    let store = session.open_store();
    assert_eq!(store.total_item_count(), 0);

    store.add_item(ProductId::new(2)).await.unwrap();
    let on_disk = std::fs::read_to_string(session.cart_file()).unwrap();
    let cart = Cart::from_json(&on_disk).unwrap();
    assert_eq!(cart.total_quantity(), 1);
}

#[tokio::test]
async fn test_remove_absent_on_fresh_session() {
    let session = Session::start().await;
    let store = session.open_store();

    assert!(store.remove_item(ProductId::new(4)).is_none());
    assert_eq!(store.total_item_count(), 0);

    let storage = FileStore::open(session.data_dir.path()).unwrap();
    assert_eq!(storage.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_app_state_wires_cart_to_catalog_and_data_dir() {
    let session = Session::start().await;
    let config = StorefrontConfig {
        catalog: session.server.config(),
        data_dir: session.data_dir.path().join("state"),
        sentry_dsn: None,
        sentry_environment: None,
    };

    let state = AppState::new(config).unwrap();
    state.cart().add_item(ProductId::new(5)).await.unwrap();

    assert_eq!(state.cart().total_item_count(), 1);
    assert!(session.data_dir.path().join("state").join("cart.json").exists());
    assert_eq!(state.catalog().categories().await.unwrap().len(), 3);
}
