//! Product endpoints and full-catalog retrieval.

use crate::{ApiClient, FetchError};
use async_trait::async_trait;
use savekaro_catalog::catalog::{CategoriesByGender, Product};
use savekaro_catalog::ProductId;
use serde::Deserialize;
use tracing::{debug, info};

/// Largest `limit` the backend accepts on the listing endpoint.
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct ProductList {
    #[serde(default)]
    products: Vec<Product>,
}

/// A source of catalog products, retrieved in offset batches.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// One batch of at most `limit` products starting at `skip`.
    async fn fetch_batch(&self, limit: usize, skip: usize) -> Result<Vec<Product>, FetchError>;

    /// Every product, fetched sequentially in batches of `batch_size`.
    ///
    /// Stops at the first batch shorter than the batch size. Any batch
    /// failure aborts the whole retrieval.
    async fn fetch_all(&self, batch_size: usize) -> Result<Vec<Product>, FetchError> {
        let limit = batch_size.clamp(1, MAX_BATCH_SIZE);
        let mut all = Vec::new();
        let mut skip = 0;

        loop {
            let batch = self.fetch_batch(limit, skip).await?;
            let received = batch.len();
            debug!(skip, limit, received, "Fetched product batch");
            all.extend(batch);
            if received < limit {
                break;
            }
            skip += limit;
        }

        info!(total = all.len(), "Fetched full catalog");
        Ok(all)
    }
}

/// Free-text product search.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Product>, FetchError>;
}

/// Typed wrappers for `/api/products`.
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: ApiClient,
}

impl ProductsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/products?limit=&skip=`
    pub async fn list_batch(&self, limit: usize, skip: usize) -> Result<Vec<Product>, FetchError> {
        let list: ProductList = self
            .client
            .get("/api/products")
            .query("limit", limit)
            .query("skip", skip)
            .send_json()
            .await?;
        Ok(list.products)
    }

    /// `GET /api/products/{id}`
    pub async fn get(&self, id: &ProductId) -> Result<Product, FetchError> {
        let path = format!("/api/products/{}", urlencoding::encode(id.as_str()));
        self.client.get(path).send_json().await
    }

    /// `GET /api/products/search?q=`
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, FetchError> {
        let list: ProductList = self
            .client
            .get("/api/products/search")
            .query("q", query)
            .send_json()
            .await?;
        Ok(list.products)
    }

    /// `GET /api/products/categories/by-gender`
    pub async fn categories_by_gender(&self) -> Result<CategoriesByGender, FetchError> {
        self.client
            .get("/api/products/categories/by-gender")
            .send_json()
            .await
    }

    /// `GET /api/products/categories/list`
    pub async fn categories_list(&self) -> Result<Vec<String>, FetchError> {
        self.client.get("/api/products/categories/list").send_json().await
    }

    /// `GET /api/products/brands/list`
    pub async fn brands(&self) -> Result<Vec<String>, FetchError> {
        self.client.get("/api/products/brands/list").send_json().await
    }

    /// Category listing for the navigation menu.
    ///
    /// Uses the by-gender endpoint; falls back to the flat list when that
    /// fails or comes back empty.
    pub async fn menu_categories(&self) -> Result<CategoriesByGender, FetchError> {
        match self.categories_by_gender().await {
            Ok(listing) if !listing.is_empty() => return Ok(listing),
            Ok(_) => debug!("By-gender category listing empty, using flat list"),
            Err(e) => debug!(error = %e, "By-gender category listing failed, using flat list"),
        }
        let flat = self.categories_list().await?;
        Ok(CategoriesByGender::from_flat(&flat))
    }
}

#[async_trait]
impl ProductSource for ProductsApi {
    async fn fetch_batch(&self, limit: usize, skip: usize) -> Result<Vec<Product>, FetchError> {
        self.list_batch(limit, skip).await
    }
}

#[async_trait]
impl ProductSearch for ProductsApi {
    async fn search(&self, query: &str) -> Result<Vec<Product>, FetchError> {
        ProductsApi::search(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product_json, MockTransport};
    use crate::Response;
    use serde_json::json;
    use std::sync::Arc;

    fn catalog_of(total: usize) -> Arc<MockTransport> {
        MockTransport::new(move |req| {
            let limit: usize = req.query_value("limit").and_then(|v| v.parse().ok()).unwrap_or(0);
            let skip: usize = req.query_value("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
            let count = total.saturating_sub(skip).min(limit);
            Ok(Response::json_value(200, &json!({ "products": product_json(skip, count) })))
        })
    }

    #[tokio::test]
    async fn test_fetch_all_stops_at_short_batch() {
        let mock = catalog_of(130);
        let api = ProductsApi::new(ApiClient::new("http://h", mock.clone()));

        let all = api.fetch_all(100).await.unwrap();
        assert_eq!(all.len(), 130);
        assert_eq!(mock.request_count(), 2);

        let skips: Vec<String> = mock
            .requests()
            .iter()
            .filter_map(|r| r.query_value("skip"))
            .collect();
        assert_eq!(skips, vec!["0", "100"]);
    }

    #[tokio::test]
    async fn test_fetch_all_exact_multiple_needs_trailing_empty_batch() {
        let mock = catalog_of(200);
        let api = ProductsApi::new(ApiClient::new("http://h", mock.clone()));
        assert_eq!(api.fetch_all(100).await.unwrap().len(), 200);
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_clamps_batch_size() {
        let mock = catalog_of(10);
        let api = ProductsApi::new(ApiClient::new("http://h", mock.clone()));
        api.fetch_all(500).await.unwrap();
        assert_eq!(mock.requests()[0].query_value("limit").as_deref(), Some("100"));
    }

    #[tokio::test]
    async fn test_fetch_all_aborts_on_failed_batch() {
        let mock = MockTransport::new(|req| {
            if req.query_value("skip").as_deref() == Some("0") {
                Ok(Response::json_value(200, &json!({ "products": product_json(0, 100) })))
            } else {
                Err(FetchError::Timeout)
            }
        });
        let api = ProductsApi::new(ApiClient::new("http://h", mock));
        assert_eq!(api.fetch_all(100).await, Err(FetchError::Timeout));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(404, &json!({"detail": "Product not found"}))));
        let api = ProductsApi::new(ApiClient::new("http://h", mock.clone()));
        let err = api.get(&ProductId::new("abc")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(mock.requests()[0].path(), "/api/products/abc");
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(200, &json!({ "products": product_json(0, 2) }))));
        let api = ProductsApi::new(ApiClient::new("http://h", mock.clone()));
        let results = ProductSearch::search(&api, "lawn suit").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(mock.requests()[0].query_value("q").as_deref(), Some("lawn suit"));
    }

    #[tokio::test]
    async fn test_menu_categories_falls_back_to_flat_list() {
        let mock = MockTransport::new(|req| match req.path() {
            "/api/products/categories/by-gender" => Ok(Response::json_value(500, &json!({"detail": "boom"}))),
            "/api/products/categories/list" => Ok(Response::json_value(
                200,
                &json!(["Men - Jeans", "Women - Kurta", "Kids - Boys Shirts"]),
            )),
            other => panic!("unexpected path {}", other),
        });
        let api = ProductsApi::new(ApiClient::new("http://h", mock));
        let listing = api.menu_categories().await.unwrap();
        assert_eq!(listing.men, vec!["Jeans"]);
        assert_eq!(listing.women, vec!["Kurta"]);
        assert_eq!(listing.kids, vec!["Boys Shirts"]);
    }
}
