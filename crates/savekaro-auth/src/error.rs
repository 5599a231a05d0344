//! Authentication errors.

use savekaro_data::FetchError;
use savekaro_store::StoreError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The action needs a signed-in user.
    #[error("login required")]
    LoginRequired,

    /// New password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password too weak.
    #[error("{0}")]
    WeakPassword(String),

    /// Reset link carried no token.
    #[error("Invalid or missing reset token. Please request a new password reset link.")]
    MissingResetToken,

    /// A required form field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Backend call failed.
    #[error("api error: {0}")]
    Api(#[from] FetchError),

    /// Local persistence failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            AuthError::LoginRequired => true,
            AuthError::Api(e) => e.is_unauthorized(),
            _ => false,
        }
    }

    /// Local validation failure, raised before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AuthError::PasswordMismatch
                | AuthError::WeakPassword(_)
                | AuthError::MissingResetToken
                | AuthError::MissingField(_)
        )
    }

    /// Message for the shopper. Backend errors use their `detail` when
    /// present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthError::Api(e) => e.user_message(fallback),
            AuthError::Store(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }
}
