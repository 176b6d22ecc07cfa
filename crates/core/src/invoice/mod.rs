//! Invoice mutations.
//!
//! This module provides:
//! - Typed invoice values (`InvoiceStatus`, `NewInvoice`, `InvoiceChanges`)
//! - Validation of untrusted form fields into those values
//! - The create, update, and delete actions over an injected store

pub mod actions;
pub mod error;
pub mod form;
pub mod types;

pub use actions::{INVOICES_PATH, InvoiceActions, InvoiceStore, Redirect, Revalidator};
pub use error::{ActionError, ActionResult, ActionState};
pub use form::{FieldErrors, FormFields, InvoiceForm, ValidatedInvoice};
pub use types::{InvoiceChanges, InvoiceStatus, NewInvoice};
