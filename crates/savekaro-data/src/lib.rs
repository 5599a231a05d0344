//! HTTP data access for the SaveKaro backend.
//!
//! Provides a small request builder over a pluggable [`Transport`], plus
//! typed wrappers for the product and auth endpoints.
//!
//! # Example
//!
//! ```rust,ignore
//! use savekaro_data::{ApiClient, ApiConfig, ProductSource, ProductsApi};
//!
//! let client = ApiClient::from_config(&ApiConfig::default())?;
//! let products = ProductsApi::new(client.clone());
//!
//! // Every product, retrieved 100 at a time
//! let all = products.fetch_all(100).await?;
//!
//! // One product
//! let product = products.get(&all[0].id).await?;
//! ```

mod error;
mod request;
mod response;
mod transport;

pub mod auth;
pub mod products;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use auth::{AuthApi, TokenResponse, User};
pub use error::FetchError;
pub use products::{ProductSearch, ProductSource, ProductsApi, MAX_BATCH_SIZE};
pub use request::{Method, Request};
pub use response::Response;
pub use transport::{ReqwestTransport, TimeoutConfig, Transport};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Default backend location for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the backend API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::from_total(Duration::from_secs(self.timeout_secs.max(1)))
    }
}

/// HTTP client bound to the backend base URL.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client over an explicit transport.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client backed by `reqwest`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(FetchError::InvalidUrl(config.base_url.clone()));
        }
        let transport = ReqwestTransport::new(config.timeouts())?;
        Ok(Self::new(config.base_url.clone(), Arc::new(transport)).with_default_header("Accept", "application/json"))
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, path)
    }

    pub fn post(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, path)
    }

    pub fn put(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, path)
    }

    pub fn delete(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, path)
    }

    /// Create a request; relative paths are joined onto the base URL.
    pub fn request(&self, method: Method, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        let path = path.as_ref();
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        };

        let mut request = Request::new(method, url);
        for (key, value) in &self.default_headers {
            request = request.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            transport: self.transport.as_ref(),
            request,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    transport: &'a dyn Transport,
    request: Request,
}

impl<'a> ClientRequestBuilder<'a> {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.request = self.request.query(key, value);
        self
    }

    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.request = self.request.json(value)?;
        Ok(self)
    }

    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.request = self.request.bearer_auth(token);
        self
    }

    /// Send the request and return the raw response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = self.request.method;
        let url = self.request.url.clone();
        let result = self.transport.send(self.request).await;
        match &result {
            Ok(response) => {
                tracing::debug!(method = method.as_str(), %url, status = response.status, "Request completed")
            }
            Err(e) => tracing::warn!(method = method.as_str(), %url, error = %e, "Request failed"),
        }
        result
    }

    /// Send, reject non-2xx statuses, and decode the JSON body.
    pub async fn send_json<T: serde::de::DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.error_for_status()?.json()
    }

    /// Send and reject non-2xx statuses, ignoring the body.
    pub async fn send_ok(self) -> Result<(), FetchError> {
        self.send().await?.error_for_status().map(|_| ())
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiClient, ApiConfig, AuthApi, FetchError, Method, ProductSearch, ProductSource, ProductsApi,
        Response, Transport,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_paths_join_base_url() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(200, &json!({}))));
        let client = ApiClient::new("http://localhost:8000/", mock.clone());

        client.get("/api/products/brands/list").send().await.unwrap();
        client.get("api/auth/me").send().await.unwrap();

        let urls: Vec<String> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:8000/api/products/brands/list",
                "http://localhost:8000/api/auth/me"
            ]
        );
    }

    #[tokio::test]
    async fn test_default_headers_are_sent() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(200, &json!({}))));
        let client = ApiClient::new("http://h", mock.clone()).with_default_header("Accept", "application/json");
        client.get("/x").send().await.unwrap();
        assert_eq!(mock.requests()[0].header_value("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_send_json_maps_http_errors() {
        let mock = MockTransport::new(|_| Ok(Response::json_value(404, &json!({"detail": "Product not found"}))));
        let client = ApiClient::new("http://h", mock);
        let err = client.get("/api/products/x").send_json::<serde_json::Value>().await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.user_message(""), "Product not found");
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let config = ApiConfig {
            base_url: "localhost:8000".to_string(),
            ..Default::default()
        };
        assert!(matches!(ApiClient::from_config(&config), Err(FetchError::InvalidUrl(_))));
    }
}
