//! The login check run on behalf of the session provider.
//!
//! Returns the user on a match and `None` otherwise; the session layer treats
//! `None` as a failed sign-in. Shape errors are reported before any lookup.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use invoicer_shared::{AppError, AppResult, types::UserId};

use super::credentials::Credentials;
use super::password::{PasswordError, verify_password};

/// A user row as stored, including the password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
}

impl std::fmt::Debug for StoredUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredUser")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[hidden]")
            .finish()
    }
}

/// The signed-in user, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
}

impl From<StoredUser> for AuthenticatedUser {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Read access to users by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Finds the user registered under `email`.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<StoredUser>>;
}

/// Login check failures other than a plain mismatch.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password failed shape validation; no lookup was made.
    #[error("invalid credentials: {0}")]
    InvalidInput(#[from] ValidationErrors),

    /// The user lookup failed.
    #[error("Failed to fetch user.")]
    Lookup(#[source] AppError),

    /// Password verification failed unexpectedly.
    #[error(transparent)]
    Password(PasswordError),
}

impl AuthError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 422,
            Self::Lookup(_) | Self::Password(_) => 500,
        }
    }
}

/// Checks credentials against the stored Argon2id hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidInput` if the email is malformed or the password is
/// shorter than six characters, and `AuthError::Lookup` if the user query fails.
pub async fn authorize<L>(
    lookup: &L,
    credentials: &Credentials,
) -> Result<Option<AuthenticatedUser>, AuthError>
where
    L: UserLookup + ?Sized,
{
    credentials.validate()?;

    let Some(user) = lookup
        .find_user_by_email(&credentials.email)
        .await
        .map_err(AuthError::Lookup)?
    else {
        info!(email = %credentials.email, "Invalid credentials");
        return Ok(None);
    };

    match verify_password(&credentials.password, &user.password_hash) {
        Ok(true) => {
            info!(user_id = %user.id, "User authorized");
            Ok(Some(user.into()))
        }
        Ok(false) => {
            info!(user_id = %user.id, "Invalid credentials");
            Ok(None)
        }
        Err(PasswordError::InvalidHash) => {
            warn!(user_id = %user.id, "Stored password is not an Argon2 hash; refusing login");
            Ok(None)
        }
        Err(e) => Err(AuthError::Password(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;

    fn stored_user(password: &str) -> StoredUser {
        StoredUser {
            id: UserId::new(),
            name: "User".to_string(),
            email: "user@nextmail.com".to_string(),
            password_hash: hash_password(password).unwrap(),
        }
    }

    fn lookup_returning(user: Option<StoredUser>) -> MockUserLookup {
        let mut lookup = MockUserLookup::new();
        lookup
            .expect_find_user_by_email()
            .withf(|email| email == "user@nextmail.com")
            .times(1)
            .returning(move |_| Ok(user.clone()));
        lookup
    }

    #[tokio::test]
    async fn test_matching_password_returns_user() {
        let user = stored_user("secret1");
        let expected = AuthenticatedUser::from(user.clone());
        let lookup = lookup_returning(Some(user));

        let result = authorize(&lookup, &Credentials::new("user@nextmail.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(result, Some(expected));
    }

    #[tokio::test]
    async fn test_wrong_password_returns_none() {
        let lookup = lookup_returning(Some(stored_user("secret1")));

        let result = authorize(&lookup, &Credentials::new("user@nextmail.com", "wrong-password"))
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_unknown_user_returns_none() {
        let lookup = lookup_returning(None);

        let result = authorize(&lookup, &Credentials::new("user@nextmail.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_malformed_input_fails_before_lookup() {
        let mut lookup = MockUserLookup::new();
        lookup.expect_find_user_by_email().never();

        let result = authorize(&lookup, &Credentials::new("bad-format", "123")).await;

        let error = result.unwrap_err();
        assert!(matches!(error, AuthError::InvalidInput(_)));
        assert_eq!(error.status_code(), 422);
    }

    #[tokio::test]
    async fn test_plaintext_stored_password_never_matches() {
        let mut user = stored_user("secret1");
        user.password_hash = "secret1".to_string();
        let lookup = lookup_returning(Some(user));

        let result = authorize(&lookup, &Credentials::new("user@nextmail.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_lookup_fault_is_reported() {
        let mut lookup = MockUserLookup::new();
        lookup
            .expect_find_user_by_email()
            .returning(|_| Err(AppError::Database("timeout".into())));

        let error = authorize(&lookup, &Credentials::new("user@nextmail.com", "secret1"))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Failed to fetch user.");
        assert_eq!(error.status_code(), 500);
    }
}
