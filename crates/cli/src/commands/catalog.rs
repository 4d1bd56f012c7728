//! Catalog browsing commands.

use shopfront_core::ProductId;
use shopfront_storefront::{AppState, Catalog};
use shopfront_storefront::catalog::products_for_category;
use shopfront_storefront::error::Result;

use crate::render;

/// List products, optionally limited and filtered by category.
pub async fn products(state: &AppState, limit: Option<u32>, category: Option<&str>) -> Result<()> {
    let products = match category {
        Some(category) => {
            let mut products = products_for_category(state.catalog(), category).await?;
            if let Some(limit) = limit {
                products.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            }
            products
        }
        None => state.catalog().products(limit).await?,
    };

    println!("{}", render::product_list(&products));
    Ok(())
}

/// Show one product in detail.
pub async fn product(state: &AppState, id: ProductId) -> Result<()> {
    let product = state.catalog().product(id).await?;
    println!("{}", render::product_detail(&product));
    Ok(())
}

/// List category names, with the `all` pseudo-category first.
pub async fn categories(state: &AppState) -> Result<()> {
    let categories = state.catalog().categories().await?;
    println!("{}", render::category_list(&categories));
    Ok(())
}
