//! Create, update, and delete invoice actions.
//!
//! Each action is a single request/response: validate the form, issue one
//! write, revalidate the invoice listing, and redirect back to it. Database
//! faults come back as a user-facing `ActionError::Database`, never a panic.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};

use invoicer_shared::{AppResult, types::InvoiceId};

use super::error::{ActionError, ActionResult};
use super::form::{FormFields, InvoiceForm};
use super::types::{InvoiceChanges, NewInvoice};

/// Listing that every successful write invalidates and redirects to.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Write access to persisted invoices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Inserts a new invoice and returns its ID.
    async fn insert_invoice(&self, invoice: &NewInvoice) -> AppResult<InvoiceId>;

    /// Overwrites customer, amount, and status of an invoice. Last write wins.
    async fn update_invoice(&self, id: InvoiceId, changes: &InvoiceChanges) -> AppResult<()>;
}

/// Signal that cached views under `scope` are stale.
#[cfg_attr(test, mockall::automock)]
pub trait Revalidator: Send + Sync {
    /// Drops cached views under `scope`.
    fn invalidate(&self, scope: &str);
}

/// Where the caller should go after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    /// Target path.
    pub location: &'static str,
}

/// Invoice mutations over an injected store and revalidator.
#[derive(Debug, Clone)]
pub struct InvoiceActions<S, R> {
    store: S,
    revalidator: R,
}

impl<S: InvoiceStore, R: Revalidator> InvoiceActions<S, R> {
    /// Creates the actions over a store and a revalidator.
    #[must_use]
    pub const fn new(store: S, revalidator: R) -> Self {
        Self { store, revalidator }
    }

    /// Creates an invoice dated today (UTC).
    pub async fn create_invoice(&self, fields: &FormFields) -> ActionResult {
        self.create_invoice_on(fields, Utc::now().date_naive()).await
    }

    /// Creates an invoice with an explicit issue date.
    pub async fn create_invoice_on(&self, fields: &FormFields, date: NaiveDate) -> ActionResult {
        let invoice = InvoiceForm::from_fields(fields)
            .validate()
            .map_err(|errors| ActionError::Validation {
                message: "Missing Fields. Failed to Create Invoice.",
                errors,
            })?
            .into_new(date);

        match self.store.insert_invoice(&invoice).await {
            Ok(id) => {
                info!(invoice_id = %id, customer_id = %invoice.customer_id, "Invoice created");
                Ok(self.revalidate_and_redirect())
            }
            Err(e) => {
                error!(error = %e, "Database Error: Failed to Create Invoice");
                Err(ActionError::Database {
                    message: "Database Error: Failed to Create Invoice.",
                    source: e,
                })
            }
        }
    }

    /// Updates an existing invoice. The issue date is left untouched.
    pub async fn update_invoice(&self, id: InvoiceId, fields: &FormFields) -> ActionResult {
        let changes = InvoiceForm::from_fields(fields)
            .validate()
            .map_err(|errors| ActionError::Validation {
                message: "Missing Fields. Failed to Update Invoice.",
                errors,
            })?
            .into_changes();

        match self.store.update_invoice(id, &changes).await {
            Ok(()) => {
                info!(invoice_id = %id, "Invoice updated");
                Ok(self.revalidate_and_redirect())
            }
            Err(e) => {
                error!(error = %e, invoice_id = %id, "Database Error: Failed to Update Invoice");
                Err(ActionError::Database {
                    message: "Database Error: Failed to Update Invoice.",
                    source: e,
                })
            }
        }
    }

    /// Deleting invoices is disabled: this always fails before touching the store.
    ///
    /// Kept as observed behavior until product confirms whether the guard is
    /// intentional; see DESIGN.md.
    pub fn delete_invoice(&self, id: InvoiceId) -> ActionResult {
        warn!(invoice_id = %id, "Rejected invoice deletion");
        Err(ActionError::DeleteDisabled)
    }

    fn revalidate_and_redirect(&self) -> Redirect {
        self.revalidator.invalidate(INVOICES_PATH);
        Redirect {
            location: INVOICES_PATH,
        }
    }
}
