//! Signed-in state, persisted to client storage.

use crate::AuthError;
use savekaro_data::{AuthApi, TokenResponse, User};
use savekaro_store::{keys, ClientStorage, StoreExt};
use tracing::{debug, info, warn};

/// The shopper's authentication state.
///
/// Passed explicitly to whatever needs it. Every change is written through
/// to the local scope of [`ClientStorage`].
#[derive(Debug, Clone)]
pub struct AuthSession {
    storage: ClientStorage,
    user: Option<User>,
    token: Option<String>,
}

impl AuthSession {
    /// A guest session over `storage`, ignoring anything persisted.
    pub fn guest(storage: ClientStorage) -> Self {
        Self {
            storage,
            user: None,
            token: None,
        }
    }

    /// Restore from storage. Authenticated only when both the user and the
    /// token are present; an unreadable user record yields a guest.
    pub fn restore(storage: ClientStorage) -> Result<Self, AuthError> {
        let token = storage.local().get(keys::TOKEN)?;
        let user = match storage.local().get_json::<User>(keys::USER) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Stored user is unreadable, starting as guest");
                None
            }
        };

        match (user, token) {
            (Some(user), Some(token)) => {
                debug!(user = %user.id, "Restored signed-in session");
                Ok(Self {
                    storage,
                    user: Some(user),
                    token: Some(token),
                })
            }
            _ => {
                debug!("No stored session");
                Ok(Self::guest(storage))
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Bearer token, or [`AuthError::LoginRequired`] for guests.
    pub fn require_token(&self) -> Result<&str, AuthError> {
        match (&self.user, &self.token) {
            (Some(_), Some(token)) => Ok(token),
            _ => Err(AuthError::LoginRequired),
        }
    }

    pub fn storage(&self) -> &ClientStorage {
        &self.storage
    }

    /// Record a successful sign-in.
    pub fn login(&mut self, user: User, token: impl Into<String>) -> Result<(), AuthError> {
        let token = token.into();
        self.storage.local().set_json(keys::USER, &user)?;
        self.storage.local().set(keys::TOKEN, &token)?;
        info!(user = %user.id, "Signed in");
        self.user = Some(user);
        self.token = Some(token);
        Ok(())
    }

    /// Sign in from a register/login response.
    pub fn login_with(&mut self, response: TokenResponse) -> Result<(), AuthError> {
        self.login(response.user, response.access_token)
    }

    /// Forget the user and token, and re-arm the login prompt.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.user = None;
        self.token = None;
        self.storage.local().delete(keys::USER)?;
        self.storage.local().delete(keys::TOKEN)?;
        self.storage.session().delete(keys::AUTH_POPUP_SHOWN)?;
        info!("Signed out");
        Ok(())
    }

    /// Replace the stored user with a fresh copy from the backend.
    ///
    /// A 401 signs the shopper out. Other failures are logged and leave the
    /// session unchanged.
    pub async fn refresh_user(&mut self, api: &AuthApi) -> Result<(), AuthError> {
        let Some(token) = self.token.clone() else {
            return Ok(());
        };

        match api.me(&token).await {
            Ok(user) => {
                self.storage.local().set_json(keys::USER, &user)?;
                debug!(user = %user.id, "Refreshed user");
                self.user = Some(user);
                Ok(())
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Token rejected, signing out");
                self.logout()
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh user");
                Ok(())
            }
        }
    }

    /// Whether the login prompt should be offered: guests only, once per
    /// session scope.
    pub fn should_prompt_login(&self) -> Result<bool, AuthError> {
        if self.is_authenticated() {
            return Ok(false);
        }
        Ok(!self.storage.session().exists(keys::AUTH_POPUP_SHOWN)?)
    }

    pub fn mark_login_prompted(&self) -> Result<(), AuthError> {
        self.storage.session().set(keys::AUTH_POPUP_SHOWN, "true")?;
        Ok(())
    }
}
