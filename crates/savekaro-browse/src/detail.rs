//! Product detail page data.

use crate::BrowseError;
use savekaro_catalog::catalog::{related_products, Product, RELATED_LIMIT};
use savekaro_catalog::ProductId;
use savekaro_data::{ProductSource, ProductsApi, MAX_BATCH_SIZE};
use serde::Serialize;
use tracing::warn;

/// A product together with its "you may also like" picks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub related: Vec<Product>,
}

/// Load a product and pick related items from the first listing batch.
///
/// A failure fetching candidates leaves `related` empty.
pub async fn load_product_detail(api: &ProductsApi, id: &ProductId) -> Result<ProductDetail, BrowseError> {
    let product = api.get(id).await.map_err(|e| {
        if e.is_not_found() {
            BrowseError::ProductNotFound(id.clone())
        } else {
            BrowseError::Fetch(e)
        }
    })?;

    let related = match api.fetch_batch(MAX_BATCH_SIZE, 0).await {
        Ok(candidates) => related_products(&product, &candidates, RELATED_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        Err(e) => {
            warn!(error = %e, "Failed to fetch related products");
            Vec::new()
        }
    };

    Ok(ProductDetail { product, related })
}
