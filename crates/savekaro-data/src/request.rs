//! HTTP request description.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// A fully described outbound request, handed to a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a percent-encoded query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url = format!(
            "{}{}{}={}",
            self.url,
            separator,
            urlencoding::encode(key),
            urlencoding::encode(&value.to_string())
        );
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Path component of the URL, without scheme, host or query.
    pub fn path(&self) -> &str {
        let rest = match self.url.split_once("://") {
            Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
            None => self.url.as_str(),
        };
        rest.split(['?', '#']).next().unwrap_or(rest)
    }

    /// Decoded value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<String> {
        let (_, query) = self.url.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| urlencoding::decode(v).ok().map(|v| v.into_owned()))
    }

    /// Value of a header, case-insensitively.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Body parsed as JSON, for inspection.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encoding() {
        let req = Request::new(Method::Get, "http://localhost:8000/api/products/search/")
            .query("q", "blue jeans & co");
        assert_eq!(req.path(), "/api/products/search/");
        assert_eq!(req.query_value("q").as_deref(), Some("blue jeans & co"));
        assert!(req.url.contains("q=blue%20jeans%20%26%20co"));
    }

    #[test]
    fn test_multiple_query_params() {
        let req = Request::new(Method::Get, "http://h/api/products/")
            .query("limit", 100)
            .query("skip", 200);
        assert!(req.url.ends_with("?limit=100&skip=200"));
        assert_eq!(req.query_value("skip").as_deref(), Some("200"));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = Request::new(Method::Post, "http://h/api/auth/login")
            .json(&serde_json::json!({"email": "a@b.pk"}))
            .unwrap()
            .bearer_auth("tok");
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.header_value("Authorization"), Some("Bearer tok"));
        let body: serde_json::Value = req.json_body().unwrap();
        assert_eq!(body["email"], "a@b.pk");
    }
}
