//! CLI command implementations.
//!
//! - `catalog` - Product listing, detail, and category commands
//! - `cart` - Cart show/add/remove/count commands

pub mod cart;
pub mod catalog;
