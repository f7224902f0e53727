//! Identity provider: email/password accounts keyed by an opaque user id.

mod sqlite;

pub use sqlite::SqliteIdentity;

use async_trait::async_trait;

use crate::errors::AppError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account creation, sign-in and deletion of the signed-in user.
///
/// Rejections are reported as `AppError::Identity` carrying a message fit to
/// show the user as-is.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Create an account and return its user id. Does not sign in.
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AppError>;

    /// Check credentials, remember the user as signed in, and return its id.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AppError>;

    /// Forget the signed-in user. Safe to call when nobody is signed in.
    async fn sign_out(&self);

    /// Delete the signed-in user's account.
    async fn delete_current_user(&self) -> Result<(), AppError>;

    /// Mark `user_id` as signed in again after a restart.
    async fn resume(&self, user_id: &str);

    /// The signed-in user id, if any.
    async fn current_user(&self) -> Option<String>;
}

/// Reject malformed emails and weak passwords before touching storage.
pub(crate) fn check_new_credentials(email: &str, password: &str) -> Result<(), AppError> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        return Err(AppError::Identity(
            "The email address is badly formatted.".to_string(),
        ));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Identity(format!(
            "Password should be at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }

    Ok(())
}
