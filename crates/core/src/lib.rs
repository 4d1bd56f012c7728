//! Shopfront Core - Shared types library.
//!
//! This crate provides the data model used across the Shopfront components:
//! - `storefront` - Catalog client, durable storage, and the cart store
//! - `cli` - Terminal front end for browsing the catalog and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, catalog products, and the cart line-item model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
