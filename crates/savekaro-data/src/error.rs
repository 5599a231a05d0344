//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Could not reach the server.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response. `message` is the backend's `detail` when present.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// HTTP status for response errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Transport-level failure (nothing came back from the server).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FetchError::RequestError(_) | FetchError::Connection(_) | FetchError::Timeout
        )
    }

    /// Message suitable for showing next to a form.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FetchError::HttpError { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        let err = FetchError::HttpError {
            status: 401,
            message: "Could not validate credentials".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
        assert!(!err.is_network());
        assert_eq!(err.user_message("Failed"), "Could not validate credentials");
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(FetchError::Timeout.user_message("Failed to load"), "Failed to load");
        assert!(FetchError::Timeout.is_network());
    }
}
