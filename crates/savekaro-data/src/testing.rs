//! In-memory transport for tests.

use crate::{FetchError, Request, Response, Transport};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

type Handler = dyn Fn(&Request) -> Result<Response, FetchError> + Send + Sync;

/// Transport that answers from a closure and records every request.
pub struct MockTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&Request) -> Result<Response, FetchError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let response = (self.handler)(&request);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        response
    }
}

/// `count` products with sequential ids starting at `start`.
pub fn product_json(start: usize, count: usize) -> Vec<serde_json::Value> {
    (start..start + count)
        .map(|i| {
            serde_json::json!({
                "_id": format!("p{}", i),
                "title": format!("Product {}", i),
                "brand": "Outfitters",
                "gender": "men",
                "category": "jeans",
                "price": 1000.0 + i as f64,
                "discount_percent": i % 60,
            })
        })
        .collect()
}
