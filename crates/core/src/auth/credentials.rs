//! Credential shape validation.

use serde::Deserialize;
use validator::Validate;

/// Email and password submitted on the login form.
#[derive(Clone, Deserialize, Validate)]
pub struct Credentials {
    /// Login email.
    #[validate(email)]
    pub email: String,
    /// Plaintext password, at least six characters.
    #[validate(length(min = 6))]
    pub password: String,
}

impl Credentials {
    /// Creates credentials from raw input.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[hidden]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_credentials() {
        assert!(Credentials::new("user@nextmail.com", "123456").validate().is_ok());
    }

    #[rstest]
    #[case("bad-format", "123456", "email")]
    #[case("user@nextmail.com", "12345", "password")]
    #[case("", "123456", "email")]
    fn test_invalid_credentials(#[case] email: &str, #[case] password: &str, #[case] field: &str) {
        let errors = Credentials::new(email, password).validate().unwrap_err();
        assert!(errors.field_errors().contains_key(field));
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("user@nextmail.com", "secret1"));
        assert!(!debug.contains("secret1"));
    }
}
