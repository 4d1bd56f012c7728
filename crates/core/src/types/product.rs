//! Catalog product types.
//!
//! These mirror the JSON shape served by the catalog:
//!
//! ```json
//! {
//!   "id": 1,
//!   "title": "Fjallraven - Foldsack No. 1 Backpack",
//!   "price": 109.95,
//!   "description": "Your perfect pack for everyday use",
//!   "category": "men's clothing",
//!   "image": "https://example.com/81fPKd-2AYL.jpg",
//!   "rating": { "rate": 3.9, "count": 120 }
//! }
//! ```
//!
//! Every field is required; a payload missing any of them fails to
//! deserialize rather than producing a half-populated product.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Maximum number of characters shown for a title on a product card.
pub const CARD_TITLE_MAX_CHARS: usize = 60;

/// Number of stars in a rating display.
pub const MAX_STARS: u8 = 5;

/// A product as published by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    /// Image URL.
    pub image: String,
    pub rating: Rating,
}

impl Product {
    /// Title shortened for product cards.
    ///
    /// Titles longer than [`CARD_TITLE_MAX_CHARS`] characters are cut at that
    /// length and suffixed with `...`.
    #[must_use]
    pub fn card_title(&self) -> String {
        if self.title.chars().count() > CARD_TITLE_MAX_CHARS {
            let head: String = self.title.chars().take(CARD_TITLE_MAX_CHARS).collect();
            format!("{head}...")
        } else {
            self.title.clone()
        }
    }
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score, 0 to 5.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

impl Rating {
    /// Star breakdown for display.
    #[must_use]
    pub fn stars(&self) -> StarRating {
        StarRating::from_rate(self.rate)
    }
}

/// Full, half, and empty stars making up a five-star display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Break a rate into stars.
    ///
    /// The whole part gives full stars, a fractional part of at least one
    /// half adds a half star, and the remainder up to [`MAX_STARS`] is empty.
    #[must_use]
    pub fn from_rate(rate: f64) -> Self {
        let rate = if rate.is_nan() {
            0.0
        } else {
            rate.clamp(0.0, f64::from(MAX_STARS))
        };

        // Clamped to 0..=5 above, so the cast cannot truncate or wrap.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let full = rate.floor() as u8;
        let half = full < MAX_STARS && rate.fract() >= 0.5;
        let empty = MAX_STARS - full - u8::from(half);

        Self { full, half, empty }
    }

    /// Render as text, e.g. `★★★½☆`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(usize::from(MAX_STARS) * 3);
        out.extend(std::iter::repeat_n('★', usize::from(self.full)));
        if self.half {
            out.push('½');
        }
        out.extend(std::iter::repeat_n('☆', usize::from(self.empty)));
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": 7,
            "title": "Widget",
            "price": 9.99,
            "description": "A widget",
            "category": "electronics",
            "image": "u",
            "rating": { "rate": 4.5, "count": 12 }
        }"#
    }

    #[test]
    fn test_product_deserializes_catalog_shape() {
        let product: Product = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.title, "Widget");
        assert_eq!(product.price, Price::from_cents(999));
        assert_eq!(product.category, "electronics");
        assert_eq!(product.rating.count, 12);
    }

    #[test]
    fn test_product_missing_field_is_rejected() {
        let json = r#"{ "id": 7, "title": "Widget", "price": 9.99 }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_product_wrong_type_is_rejected() {
        let json = sample_json().replace("\"id\": 7", "\"id\": \"seven\"");
        assert!(serde_json::from_str::<Product>(&json).is_err());
    }

    #[test]
    fn test_card_title_short_is_unchanged() {
        let product: Product = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(product.card_title(), "Widget");
    }

    #[test]
    fn test_card_title_truncates_long_titles() {
        let mut product: Product = serde_json::from_str(sample_json()).unwrap();
        product.title = "x".repeat(61);
        let title = product.card_title();
        assert_eq!(title, format!("{}...", "x".repeat(60)));
    }

    #[test]
    fn test_card_title_exactly_at_limit() {
        let mut product: Product = serde_json::from_str(sample_json()).unwrap();
        product.title = "é".repeat(60);
        assert_eq!(product.card_title(), "é".repeat(60));
    }

    #[test]
    fn test_stars_whole_rate() {
        let stars = StarRating::from_rate(4.0);
        assert_eq!(
            stars,
            StarRating {
                full: 4,
                half: false,
                empty: 1
            }
        );
    }

    #[test]
    fn test_stars_half_rate() {
        let stars = StarRating::from_rate(3.6);
        assert_eq!(
            stars,
            StarRating {
                full: 3,
                half: true,
                empty: 1
            }
        );
    }

    #[test]
    fn test_stars_low_fraction_rounds_down() {
        let stars = StarRating::from_rate(3.2);
        assert_eq!(
            stars,
            StarRating {
                full: 3,
                half: false,
                empty: 2
            }
        );
    }

    #[test]
    fn test_stars_always_total_five() {
        for tenths in 0..=50 {
            let stars = StarRating::from_rate(f64::from(tenths) / 10.0);
            assert_eq!(stars.full + u8::from(stars.half) + stars.empty, MAX_STARS);
        }
    }

    #[test]
    fn test_stars_clamp_out_of_range() {
        assert_eq!(StarRating::from_rate(7.3).full, 5);
        assert_eq!(StarRating::from_rate(-1.0).empty, 5);
        assert_eq!(StarRating::from_rate(f64::NAN).empty, 5);
    }

    #[test]
    fn test_stars_render() {
        assert_eq!(StarRating::from_rate(3.5).render(), "★★★½☆");
        assert_eq!(StarRating::from_rate(0.0).render(), "☆☆☆☆☆");
    }
}
