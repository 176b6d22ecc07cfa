//! Invoice repository: listing, search, pagination, and writes.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    QueryFilter, Set, Statement, sea_query::Expr,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use invoicer_core::invoice::{InvoiceChanges, InvoiceStore, NewInvoice};
use invoicer_shared::{
    AppResult,
    types::{
        InvoiceId, PageRequest, cents_to_dollars, format_currency, format_date_to_local,
        total_pages,
    },
};

use super::{contains_pattern, error::DatabaseError};
use crate::entities::invoices;

/// Join and search predicate shared by the page query and the page count.
///
/// `$1` is the `%query%` pattern; numeric and date columns are matched as text.
macro_rules! invoice_search {
    () => {
        r"
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE
            customers.name ILIKE $1 OR
            customers.email ILIKE $1 OR
            invoices.amount::text ILIKE $1 OR
            invoices.date::text ILIKE $1 OR
            invoices.status ILIKE $1
        "
    };
}

const FILTERED_INVOICES_SQL: &str = concat!(
    r"
    SELECT
        invoices.id,
        invoices.customer_id,
        invoices.amount,
        invoices.date,
        invoices.status,
        customers.name,
        customers.email,
        customers.image_url
    ",
    invoice_search!(),
    r"
    ORDER BY invoices.date DESC, invoices.id
    LIMIT $2 OFFSET $3
    "
);

const INVOICES_COUNT_SQL: &str = concat!("SELECT COUNT(*) AS count", invoice_search!());

const LATEST_INVOICES_SQL: &str = r"
    SELECT invoices.id, invoices.amount, customers.name, customers.image_url, customers.email
    FROM invoices
    JOIN customers ON invoices.customer_id = customers.id
    ORDER BY invoices.date DESC, invoices.id
    LIMIT 5
";

/// One of the most recent invoices, amount already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestInvoice {
    /// Invoice ID.
    pub id: Uuid,
    /// Customer name.
    pub name: String,
    /// Customer avatar path.
    pub image_url: String,
    /// Customer email.
    pub email: String,
    /// Amount as a currency string.
    pub amount: String,
}

#[derive(Debug, FromQueryResult)]
struct LatestInvoiceRow {
    id: Uuid,
    amount: i32,
    name: String,
    image_url: String,
    email: String,
}

/// A row of the searchable invoice table.
///
/// `amount` and `date` keep their stored form for sorting and editing; the
/// `formatted_*` fields are what the table displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredInvoice {
    /// Invoice ID.
    pub id: Uuid,
    /// Billed customer.
    pub customer_id: Uuid,
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer avatar path.
    pub image_url: String,
    /// Issue date.
    pub date: NaiveDate,
    /// Amount in cents.
    pub amount: i32,
    /// `pending` or `paid`.
    pub status: String,
    /// Amount as a currency string, e.g. `$1,578.95`.
    pub formatted_amount: String,
    /// Issue date as shown in the table, e.g. `Dec 6, 2022`.
    pub formatted_date: String,
}

#[derive(Debug, FromQueryResult)]
struct FilteredInvoiceRow {
    id: Uuid,
    customer_id: Uuid,
    name: String,
    email: String,
    image_url: String,
    date: NaiveDate,
    amount: i32,
    status: String,
}

impl From<FilteredInvoiceRow> for FilteredInvoice {
    fn from(row: FilteredInvoiceRow) -> Self {
        Self {
            formatted_amount: format_currency(i64::from(row.amount)),
            formatted_date: format_date_to_local(row.date),
            id: row.id,
            customer_id: row.customer_id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            date: row.date,
            amount: row.amount,
            status: row.status,
        }
    }
}

/// An invoice loaded into the edit form. `amount` is in dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceForEdit {
    /// Invoice ID.
    pub id: Uuid,
    /// Billed customer.
    pub customer_id: Uuid,
    /// Amount in dollars (cents / 100).
    pub amount: Decimal,
    /// `pending` or `paid`.
    pub status: String,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

/// Invoice repository for reads and writes.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the five most recent invoices with their customer.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch the latest invoices.` if the query fails.
    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, DatabaseError> {
        let rows = LatestInvoiceRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            LATEST_INVOICES_SQL,
        ))
        .all(&self.db)
        .await
        .map_err(DatabaseError::wrap("Failed to fetch the latest invoices."))?;

        Ok(rows
            .into_iter()
            .map(|row| LatestInvoice {
                id: row.id,
                name: row.name,
                image_url: row.image_url,
                email: row.email,
                amount: format_currency(i64::from(row.amount)),
            })
            .collect())
    }

    /// Fetches one page of invoices whose customer name, customer email,
    /// amount, date, or status contains `query` (case-insensitive).
    ///
    /// Rows are ordered newest first; ties on date are broken by ID so pages
    /// never overlap.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch invoices.` if the query fails.
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Vec<FilteredInvoice>, DatabaseError> {
        let rows = FilteredInvoiceRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            FILTERED_INVOICES_SQL,
            [
                contains_pattern(query).into(),
                as_bigint(page.limit()).into(),
                as_bigint(page.offset()).into(),
            ],
        ))
        .all(&self.db)
        .await
        .map_err(DatabaseError::wrap("Failed to fetch invoices."))?;

        Ok(rows.into_iter().map(FilteredInvoice::from).collect())
    }

    /// Counts the pages `fetch_filtered_invoices` would produce for `query`.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch total number of invoices.` if the query fails.
    pub async fn fetch_invoices_pages(&self, query: &str) -> Result<u64, DatabaseError> {
        let row = CountRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            INVOICES_COUNT_SQL,
            [contains_pattern(query).into()],
        ))
        .one(&self.db)
        .await
        .map_err(DatabaseError::wrap("Failed to fetch total number of invoices."))?;

        let count = row.map_or(0, |r| u64::try_from(r.count).unwrap_or(0));
        Ok(total_pages(count))
    }

    /// Fetches an invoice for editing, converting cents to dollars.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch invoice.` if the query fails.
    pub async fn fetch_invoice_by_id(
        &self,
        id: InvoiceId,
    ) -> Result<Option<InvoiceForEdit>, DatabaseError> {
        let invoice = invoices::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(DatabaseError::wrap("Failed to fetch invoice."))?;

        Ok(invoice.map(|invoice| InvoiceForEdit {
            id: invoice.id,
            customer_id: invoice.customer_id,
            amount: cents_to_dollars(i64::from(invoice.amount)),
            status: invoice.status,
        }))
    }

    /// Inserts an invoice.
    ///
    /// # Errors
    ///
    /// Returns `Failed to create invoice.` if the insert fails.
    pub async fn insert(&self, invoice: &NewInvoice) -> Result<InvoiceId, DatabaseError> {
        let model = invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(invoice.customer_id.into_inner()),
            amount: Set(invoice.amount_cents),
            status: Set(invoice.status.as_str().to_string()),
            date: Set(invoice.date),
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(DatabaseError::wrap("Failed to create invoice."))?;

        Ok(InvoiceId::from_uuid(inserted.id))
    }

    /// Overwrites customer, amount, and status of an invoice.
    ///
    /// Updating a missing invoice is not an error; it is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns `Failed to update invoice.` if the update fails.
    pub async fn update(
        &self,
        id: InvoiceId,
        changes: &InvoiceChanges,
    ) -> Result<(), DatabaseError> {
        let result = invoices::Entity::update_many()
            .col_expr(
                invoices::Column::CustomerId,
                Expr::value(changes.customer_id.into_inner()),
            )
            .col_expr(invoices::Column::Amount, Expr::value(changes.amount_cents))
            .col_expr(invoices::Column::Status, Expr::value(changes.status.as_str()))
            .filter(invoices::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(DatabaseError::wrap("Failed to update invoice."))?;

        if result.rows_affected == 0 {
            warn!(invoice_id = %id, "Update matched no invoice");
        }

        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for InvoiceRepository {
    async fn insert_invoice(&self, invoice: &NewInvoice) -> AppResult<InvoiceId> {
        Ok(self.insert(invoice).await?)
    }

    async fn update_invoice(&self, id: InvoiceId, changes: &InvoiceChanges) -> AppResult<()> {
        Ok(self.update(id, changes).await?)
    }
}

/// Postgres has no unsigned integers; clamp into `BIGINT`.
fn as_bigint(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
