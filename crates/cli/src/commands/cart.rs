//! Cart commands.
//!
//! Each command runs against the session's [`CartStore`](shopfront_storefront::CartStore),
//! which persists the cart after every change.

use shopfront_core::ProductId;
use shopfront_storefront::AppState;
use shopfront_storefront::error::Result;

use crate::render;

/// Print the cart contents.
pub fn show(state: &AppState) {
    println!("{}", render::cart(&state.cart().snapshot()));
}

/// Add one unit of a product.
pub async fn add(state: &AppState, id: ProductId) -> Result<()> {
    let line = state.cart().add_item(id).await?;
    println!("Product added to cart!");
    println!("{}", render::cart_line(&line));
    println!("{}", render::cart_count(state.cart().total_item_count()));
    Ok(())
}

/// Remove a product's line. Succeeds even if the product was not in the cart.
pub fn remove(state: &AppState, id: ProductId) {
    state.cart().remove_item(id);
    println!("Product removed from cart!");
    println!("{}", render::cart_count(state.cart().total_item_count()));
}

/// Print the total number of items.
pub fn count(state: &AppState) {
    println!("{}", state.cart().total_item_count());
}
