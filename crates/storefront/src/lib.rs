//! Shopfront Storefront library.
//!
//! Everything a storefront front end needs below the presentation layer:
//!
//! - [`catalog`] - typed, cached client for the product catalog API
//! - [`storage`] - durable key-value persistence
//! - [`cart`] - the session cart store, mirrored into storage
//! - [`config`] / [`state`] - configuration and the shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;

pub use cart::{CartError, CartStore};
pub use catalog::{Catalog, CatalogClient, CatalogError};
pub use error::AppError;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
