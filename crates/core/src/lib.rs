//! Core business logic for Invoicer.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Collaborators (the invoice store, the user lookup, listing revalidation) are
//! traits implemented by the `db` and `api` crates.
//!
//! # Modules
//!
//! - `invoice` - Form validation and the create/update/delete invoice actions
//! - `auth` - Credential validation, password hashing, and the login check

pub mod auth;
pub mod invoice;
