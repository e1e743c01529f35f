//! Credential validation helpers
//!
//! Format checks run before any auth request is sent. Both the login and
//! the signup screen use the same rules.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// ── Credential rules ────────────────────────────────────────────────

/// Minimum username/password length (chars)
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// Maximum username/password length (chars)
pub const MAX_CREDENTIAL_LEN: usize = 9;

/// Symbols a password may contain (at least one is required)
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,9}$").expect("username pattern is valid"));

static PASSWORD_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]{3,9}$").expect("password pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username must be 3-9 characters long and contain only letters, numbers, and underscores.")]
    InvalidUsername,

    #[error("Password must be 3-9 characters long, include a number and a special character, and have no spaces.")]
    InvalidPassword,

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// 3-9 chars, ASCII letters, digits and underscores only
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// 3-9 chars from letters, digits and [`PASSWORD_SYMBOLS`], with at least
/// one digit, at least one symbol, and no spaces
pub fn is_valid_password(password: &str) -> bool {
    !password.contains(' ')
        && PASSWORD_CHARSET_RE.is_match(password)
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if is_valid_username(username) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUsername)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPassword)
    }
}

/// Username, then password; the first failure wins
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    validate_username(username)?;
    validate_password(password)
}

pub fn validate_confirmation(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}
