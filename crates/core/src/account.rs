//! Sign-in rules: username normalization and the failed-login lockout.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Consecutive failed sign-ins that lock an account.
pub const MAX_FAILED_LOGINS: i32 = 5;

/// How long a locked account stays locked.
pub const LOCKOUT_MINUTES: i64 = 15;

pub const MAX_USERNAME_LENGTH: usize = 150;

/// Trimmed username, or a validation error when blank or too long.
pub fn normalize_username(raw: &str) -> Result<&str, CoreError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(CoreError::validation("username", "Username is required"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::validation(
            "username",
            format!("Username must be at most {MAX_USERNAME_LENGTH} characters"),
        ));
    }
    Ok(username)
}

/// Reject deactivated accounts and accounts whose lock has not expired.
pub fn ensure_can_sign_in(
    is_active: bool,
    locked_until: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), CoreError> {
    if !is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()));
    }
    if locked_until.is_some_and(|until| until > now) {
        return Err(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        ));
    }
    Ok(())
}

/// When a lock triggered by a failure at `now` expires.
pub fn lockout_expiry(now: Timestamp) -> Timestamp {
    now + Duration::minutes(LOCKOUT_MINUTES)
}
