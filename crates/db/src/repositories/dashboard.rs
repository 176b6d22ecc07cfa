//! Dashboard repository for the summary cards.

use sea_orm::{
    DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, PaginatorTrait, Statement,
};
use serde::Serialize;

use invoicer_shared::types::format_currency;

use super::error::DatabaseError;
use crate::entities::{customers, invoices};

const INVOICE_STATUS_SQL: &str = r"
    SELECT
        COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0)::bigint AS paid,
        COALESCE(SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END), 0)::bigint AS pending
    FROM invoices
";

const CARD_DATA_ERROR: &str = "Failed to fetch card data.";

/// Summary card values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardData {
    /// Total number of invoices.
    pub number_of_invoices: u64,
    /// Total number of customers.
    pub number_of_customers: u64,
    /// Sum of paid invoices as a currency string.
    pub total_paid_invoices: String,
    /// Sum of pending invoices as a currency string.
    pub total_pending_invoices: String,
}

#[derive(Debug, Default, FromQueryResult)]
struct StatusTotals {
    paid: i64,
    pending: i64,
}

impl StatusTotals {
    fn into_card_data(self, number_of_invoices: u64, number_of_customers: u64) -> CardData {
        CardData {
            number_of_invoices,
            number_of_customers,
            total_paid_invoices: format_currency(self.paid),
            total_pending_invoices: format_currency(self.pending),
        }
    }
}

/// Dashboard repository for aggregate queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches invoice and customer counts and the paid/pending totals.
    ///
    /// Three independent statements, issued one after another.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch card data.` if any of the queries fails.
    pub async fn fetch_card_data(&self) -> Result<CardData, DatabaseError> {
        let number_of_invoices = invoices::Entity::find()
            .count(&self.db)
            .await
            .map_err(DatabaseError::wrap(CARD_DATA_ERROR))?;

        let number_of_customers = customers::Entity::find()
            .count(&self.db)
            .await
            .map_err(DatabaseError::wrap(CARD_DATA_ERROR))?;

        let totals = StatusTotals::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            INVOICE_STATUS_SQL,
        ))
        .one(&self.db)
        .await
        .map_err(DatabaseError::wrap(CARD_DATA_ERROR))?
        .unwrap_or_default();

        Ok(totals.into_card_data(number_of_invoices, number_of_customers))
    }
}
