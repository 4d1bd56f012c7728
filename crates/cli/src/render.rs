//! Plain-text rendering of products and the cart.

use std::fmt::Write;

use shopfront_core::{Cart, CartLineItem, Product};
use shopfront_storefront::catalog::ALL_CATEGORIES;

/// One product card per block, separated by blank lines.
pub fn product_list(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }
    products
        .iter()
        .map(product_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Compact card: truncated title, category, rating, price.
pub fn product_card(product: &Product) -> String {
    format!(
        "[{}] {}\n    {} | {} {} ({}) | {}",
        product.id,
        product.card_title(),
        product.category,
        product.rating.stars().render(),
        product.rating.rate,
        product.rating.count,
        product.price,
    )
}

/// Full product view including the description.
pub fn product_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.title);
    let _ = writeln!(out, "Category: {}", product.category);
    let _ = writeln!(
        out,
        "Rating:   {} {} ({} reviews)",
        product.rating.stars().render(),
        product.rating.rate,
        product.rating.count
    );
    let _ = writeln!(out, "Price:    {}", product.price);
    let _ = writeln!(out, "Image:    {}", product.image);
    let _ = writeln!(out);
    let _ = write!(out, "{}", product.description);
    out
}

/// Category names, one per line, preceded by the `all` pseudo-category.
pub fn category_list(categories: &[String]) -> String {
    std::iter::once(ALL_CATEGORIES)
        .chain(categories.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `2 x Widget @ $9.99  [id 7]`
pub fn cart_line(line: &CartLineItem) -> String {
    format!(
        "{} x {} @ {}  [id {}]",
        line.quantity, line.title, line.price, line.id
    )
}

/// `Cart: 3 items`
pub fn cart_count(count: u32) -> String {
    if count == 1 {
        "Cart: 1 item".to_string()
    } else {
        format!("Cart: {count} items")
    }
}

/// All cart lines followed by the item count.
pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }
    let mut out = String::new();
    for line in cart.items() {
        let _ = writeln!(out, "{}", cart_line(line));
    }
    out.push_str(&cart_count(cart.total_quantity()));
    out
}
