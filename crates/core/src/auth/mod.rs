//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Credential shape validation
//! - The login check run on behalf of the session provider

mod authorize;
mod credentials;
mod password;

pub use authorize::{AuthError, AuthenticatedUser, StoredUser, UserLookup, authorize};
pub use credentials::Credentials;
pub use password::{PasswordError, hash_password, verify_password};

