//! Account commands: sign in and out, registration, password and profile.

use anyhow::{anyhow, bail, Result};
use dialoguer::{Input, Password};
use savekaro_auth::{Account, AuthError, AuthSession, User};

use super::{AccountArgs, AccountCommand};
use crate::context::Context;

/// Run the account command.
pub async fn run(args: AccountArgs, ctx: &Context) -> Result<()> {
    let account = Account::new(ctx.auth_api()?);
    let mut session = ctx.session()?;

    match args.command {
        AccountCommand::Login { email, password } => {
            let password = password_or_prompt(password, "Password")?;
            account
                .sign_in(&mut session, &email, &password)
                .await
                .map_err(|e| shopper_error(e, "Login failed"))?;
            signed_in(&session, ctx);
        }
        AccountCommand::Register { email, name, password } => {
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()?,
            };
            account
                .register(&mut session, &email, &password, &name)
                .await
                .map_err(|e| shopper_error(e, "Registration failed"))?;
            signed_in(&session, ctx);
            if session.user().is_some_and(|u| !u.is_verified) {
                ctx.output.info("Check your inbox for a verification link");
            }
        }
        AccountCommand::Logout => {
            if !session.is_authenticated() {
                ctx.output.info("Not signed in");
                return Ok(());
            }
            session.logout()?;
            ctx.output.success("Signed out");
        }
        AccountCommand::Me { refresh } => {
            if !session.is_authenticated() {
                return Err(shopper_error(AuthError::LoginRequired, ""));
            }
            if refresh {
                session
                    .refresh_user(account.api())
                    .await
                    .map_err(|e| shopper_error(e, "Failed to load account"))?;
                if !session.is_authenticated() {
                    bail!("Your session has expired. Please sign in again");
                }
            }
            if let Some(user) = session.user() {
                print_user(user, ctx);
            }
        }
        AccountCommand::VerifyEmail { token } => {
            let message = account
                .verify_email(&mut session, &token)
                .await
                .map_err(|e| shopper_error(e, "Verification failed"))?;
            ctx.output.success(&message);
        }
        AccountCommand::ResendVerification => {
            let message = account
                .resend_verification(&session)
                .await
                .map_err(|e| shopper_error(e, "Failed to resend verification email"))?;
            ctx.output.success(&message);
        }
        AccountCommand::ForgotPassword { email } => {
            let message = account
                .forgot_password(&email)
                .await
                .map_err(|e| shopper_error(e, "Failed to send reset email"))?;
            ctx.output.success(&message);
        }
        AccountCommand::ResetPassword { token, password, confirm } => {
            if token.as_deref().map_or(true, |t| t.trim().is_empty()) {
                return Err(shopper_error(AuthError::MissingResetToken, ""));
            }
            let password = password_or_prompt(password, "New password")?;
            let confirm = password_or_prompt(confirm, "Confirm new password")?;
            let message = account
                .reset_password(token.as_deref(), &password, &confirm)
                .await
                .map_err(|e| shopper_error(e, "Failed to reset password"))?;
            ctx.output.success(&message);
        }
        AccountCommand::ChangePassword { current, password, confirm } => {
            if !session.is_authenticated() {
                return Err(shopper_error(AuthError::LoginRequired, ""));
            }
            let current = password_or_prompt(current, "Current password")?;
            let password = password_or_prompt(password, "New password")?;
            let confirm = password_or_prompt(confirm, "Confirm new password")?;
            let message = account
                .change_password(&session, &current, &password, &confirm)
                .await
                .map_err(|e| shopper_error(e, "Failed to change password"))?;
            ctx.output.success(&message);
        }
        AccountCommand::UpdateProfile { name, email } => {
            let Some(user) = session.user().cloned() else {
                return Err(shopper_error(AuthError::LoginRequired, ""));
            };
            let name = match name {
                Some(name) => name,
                None => Input::new()
                    .with_prompt("Name")
                    .with_initial_text(user.name.clone())
                    .allow_empty(true)
                    .interact_text()?,
            };
            let email = email.unwrap_or(user.email);
            account
                .update_profile(&mut session, &name, &email)
                .await
                .map_err(|e| shopper_error(e, "Failed to update profile"))?;
            ctx.output.success("Profile updated");
            if let Some(user) = session.user() {
                print_user(user, ctx);
            }
        }
    }

    Ok(())
}

fn password_or_prompt(given: Option<String>, prompt: &str) -> Result<String> {
    match given {
        Some(password) => Ok(password),
        None => Ok(Password::new().with_prompt(prompt).interact()?),
    }
}

/// Turn an auth failure into the message a shopper should see.
fn shopper_error(error: AuthError, fallback: &str) -> anyhow::Error {
    match error {
        AuthError::LoginRequired => anyhow!("Not signed in. Run `savekaro account login <email>` first"),
        AuthError::Store(e) => anyhow::Error::new(e).context(fallback.to_string()),
        other => anyhow!(other.user_message(fallback)),
    }
}

fn signed_in(session: &AuthSession, ctx: &Context) {
    match session.user() {
        Some(user) if ctx.output.is_json() => ctx.output.json(user),
        Some(user) => ctx.output.success(&format!("Signed in as {}", user.display_name())),
        None => {}
    }
}

fn print_user(user: &User, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(user);
        return;
    }

    ctx.output.header(user.display_name());
    ctx.output.kv("email", &user.email);
    if !user.name.is_empty() {
        ctx.output.kv("name", &user.name);
    }
    let verified = if user.is_verified {
        console::style("verified").green()
    } else {
        console::style("not verified").yellow()
    };
    ctx.output.kv("status", &verified.to_string());
    if let Some(created_at) = user.created_at {
        ctx.output.kv("member since", &created_at.format("%d %b %Y").to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savekaro_data::FetchError;

    #[test]
    fn test_shopper_error_prefers_backend_detail() {
        let error = AuthError::Api(FetchError::HttpError {
            status: 401,
            message: "Invalid email or password".to_string(),
        });
        assert_eq!(shopper_error(error, "Login failed").to_string(), "Invalid email or password");
    }

    #[test]
    fn test_shopper_error_for_validation() {
        let error = shopper_error(AuthError::PasswordMismatch, "Failed to change password");
        assert_eq!(error.to_string(), "Passwords do not match");
    }
}
