//! Local checks run on password forms before anything is sent.

use crate::AuthError;

/// Shortest password accepted by the reset form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// New password and its confirmation must be identical.
pub fn validate_confirmation(new_password: &str, confirmation: &str) -> Result<(), AuthError> {
    if new_password == confirmation {
        Ok(())
    } else {
        Err(AuthError::PasswordMismatch)
    }
}

/// Minimum length, counted in characters.
pub fn validate_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Checks for the reset-password form, in the order the form reports them.
pub fn validate_reset(token: Option<&str>, new_password: &str, confirmation: &str) -> Result<String, AuthError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingResetToken)?;
    validate_confirmation(new_password, confirmation)?;
    validate_strength(new_password)?;
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation() {
        assert!(validate_confirmation("secret1", "secret1").is_ok());
        assert!(matches!(
            validate_confirmation("secret1", "secret2"),
            Err(AuthError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_strength() {
        assert!(validate_strength("abcdef").is_ok());
        assert!(validate_strength("abcde").is_err());
        assert!(validate_strength("ذذذذذذ").is_ok());
    }

    #[test]
    fn test_reset_order_of_checks() {
        assert!(matches!(
            validate_reset(None, "a", "b"),
            Err(AuthError::MissingResetToken)
        ));
        assert!(matches!(
            validate_reset(Some("  "), "secret1", "secret1"),
            Err(AuthError::MissingResetToken)
        ));
        assert!(matches!(
            validate_reset(Some("tok"), "abc", "abd"),
            Err(AuthError::PasswordMismatch)
        ));
        assert!(matches!(
            validate_reset(Some("tok"), "abc", "abc"),
            Err(AuthError::WeakPassword(_))
        ));
        assert_eq!(validate_reset(Some("tok"), "secret1", "secret1").unwrap(), "tok");
    }
}
