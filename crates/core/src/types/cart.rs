//! Cart line items and the cart sequence.
//!
//! A [`Cart`] is an ordered list of [`CartLineItem`]s keyed by product ID.
//! The only invariant is that no two lines share an ID; repeat adds of the
//! same product bump that line's quantity instead of appending.
//!
//! The serialized form is a bare JSON array of line items:
//!
//! ```json
//! [{ "id": 7, "title": "Widget", "price": 9.99, "image": "u", "quantity": 2 }]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// Reasons a deserialized cart cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartStateError {
    /// The JSON could not be parsed as a list of line items.
    #[error("Malformed cart data: {0}")]
    Malformed(String),

    /// Two lines share a product ID.
    #[error("Duplicate cart line for product {0}")]
    DuplicateLine(ProductId),

    /// A line has a quantity of zero.
    #[error("Cart line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// One product in the cart.
///
/// `title`, `price`, and `image` are snapshots taken when the product was
/// first added and are not refreshed on later adds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLineItem {
    /// A new line with quantity 1 snapshotting the product's display fields.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }
}

/// Ordered list of cart lines with unique product IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from lines, checking the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns `CartStateError` if two lines share an ID or any line has a
    /// zero quantity.
    pub fn from_items(items: Vec<CartLineItem>) -> Result<Self, CartStateError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.quantity == 0 {
                return Err(CartStateError::ZeroQuantity(item.id));
            }
            if !seen.insert(item.id) {
                return Err(CartStateError::DuplicateLine(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Parse a cart from its JSON array form.
    ///
    /// # Errors
    ///
    /// Returns `CartStateError::Malformed` if the JSON does not match the
    /// line-item shape, or an invariant error from [`Cart::from_items`].
    pub fn from_json(json: &str) -> Result<Self, CartStateError> {
        let items: Vec<CartLineItem> = serde_json::from_str(json)
            .map_err(|e| CartStateError::Malformed(e.to_string()))?;
        Self::from_items(items)
    }

    /// Serialize to the JSON array form.
    #[must_use]
    pub fn to_json(&self) -> String {
        // A Vec of plain structs with string keys always serializes.
        serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_string())
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether the cart has a line for this product.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Bump an existing line's quantity by one.
    ///
    /// Returns the updated line, or `None` if the product is not in the cart.
    pub fn increment(&mut self, id: ProductId) -> Option<&CartLineItem> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.quantity = item.quantity.saturating_add(1);
        Some(item)
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line when there is one (leaving its snapshot
    /// untouched), otherwise appends a new line built from `product`.
    pub fn add_product(&mut self, product: &Product) -> &CartLineItem {
        let existing = self.items.iter().position(|item| item.id == product.id);
        let index = match existing {
            Some(index) => index,
            None => {
                self.items.push(CartLineItem {
                    quantity: 0,
                    ..CartLineItem::from_product(product)
                });
                self.items.len() - 1
            }
        };
        // index is either a found position or the line just pushed
        #[allow(clippy::indexing_slicing)]
        let item = &mut self.items[index];
        item.quantity = item.quantity.saturating_add(1);
        item
    }

    /// Remove a product's line. Returns the removed line, if any.
    pub fn remove(&mut self, id: ProductId) -> Option<CartLineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<CartLineItem>::deserialize(deserializer)?;
        Self::from_items(items).map_err(serde::de::Error::custom)
    }
}
