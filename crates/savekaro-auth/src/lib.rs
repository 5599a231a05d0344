//! Shopper session, account operations and favorites for SaveKaro.
//!
//! # Example
//!
//! ```rust,ignore
//! use savekaro_auth::{Account, AuthSession};
//!
//! let mut session = AuthSession::restore(storage)?;
//! let account = Account::new(auth_api);
//!
//! if !session.is_authenticated() {
//!     account.sign_in(&mut session, "sana@example.pk", "secret1").await?;
//! }
//! ```

mod account;
mod error;
mod favorites;
pub mod password;
mod session;

pub use account::Account;
pub use error::AuthError;
pub use favorites::{local_favorites, Favorites, Persisted, Toggled};
pub use session::AuthSession;

pub use savekaro_data::{TokenResponse, User};
