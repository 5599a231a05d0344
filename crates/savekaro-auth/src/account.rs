//! Account operations behind the login, signup and "My Account" forms.

use crate::password::{validate_confirmation, validate_reset};
use crate::{AuthError, AuthSession};
use savekaro_data::AuthApi;
use tracing::info;

/// Account operations against the backend.
#[derive(Debug, Clone)]
pub struct Account {
    api: AuthApi,
}

impl Account {
    pub fn new(api: AuthApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &AuthApi {
        &self.api
    }

    /// Create an account and sign in with it.
    pub async fn register(
        &self,
        session: &mut AuthSession,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), AuthError> {
        let email = required("Email", email)?;
        required("Password", password)?;
        let response = self.api.register(email, password, name.trim()).await?;
        session.login_with(response)
    }

    pub async fn sign_in(&self, session: &mut AuthSession, email: &str, password: &str) -> Result<(), AuthError> {
        let email = required("Email", email)?;
        required("Password", password)?;
        let response = self.api.login(email, password).await?;
        session.login_with(response)
    }

    /// Confirm an email address. A signed-in session is refreshed so the
    /// verified flag shows up.
    pub async fn verify_email(&self, session: &mut AuthSession, verification_token: &str) -> Result<String, AuthError> {
        let verification_token = required("Verification token", verification_token)?;
        let message = self.api.verify_email(verification_token).await?;
        if session.is_authenticated() {
            session.refresh_user(&self.api).await?;
        }
        Ok(message)
    }

    pub async fn resend_verification(&self, session: &AuthSession) -> Result<String, AuthError> {
        let token = session.require_token()?;
        Ok(self.api.resend_verification(token).await?)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<String, AuthError> {
        let email = required("Email", email)?;
        Ok(self.api.forgot_password(email).await?)
    }

    /// Set a new password from a reset link.
    pub async fn reset_password(
        &self,
        reset_token: Option<&str>,
        new_password: &str,
        confirmation: &str,
    ) -> Result<String, AuthError> {
        let reset_token = validate_reset(reset_token, new_password, confirmation)?;
        let message = self.api.reset_password(&reset_token, new_password).await?;
        info!("Password reset");
        Ok(message)
    }

    pub async fn change_password(
        &self,
        session: &AuthSession,
        current_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<String, AuthError> {
        validate_confirmation(new_password, confirmation)?;
        let token = session.require_token()?;
        Ok(self
            .api
            .change_password(token, current_password, new_password)
            .await?)
    }

    /// Save name and email, then reload the user.
    pub async fn update_profile(&self, session: &mut AuthSession, name: &str, email: &str) -> Result<(), AuthError> {
        let email = required("Email", email)?;
        let token = session.require_token()?.to_string();
        self.api.update_profile(&token, name.trim(), email).await?;
        session.refresh_user(&self.api).await
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AuthError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(value)
    }
}
