//! Customer repository for the customer picker and the customer table.

use sea_orm::{
    DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, QueryOrder, QuerySelect,
    Statement,
};
use serde::Serialize;
use uuid::Uuid;

use invoicer_shared::types::format_currency;

use super::{contains_pattern, error::DatabaseError};
use crate::entities::customers;

const FILTERED_CUSTOMERS_SQL: &str = r"
    SELECT
        customers.id,
        customers.name,
        customers.email,
        customers.image_url,
        COUNT(invoices.id) AS total_invoices,
        COALESCE(SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END), 0)::bigint AS total_pending,
        COALESCE(SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END), 0)::bigint AS total_paid
    FROM customers
    LEFT JOIN invoices ON customers.id = invoices.customer_id
    WHERE
        customers.name ILIKE $1 OR
        customers.email ILIKE $1
    GROUP BY customers.id, customers.name, customers.email, customers.image_url
    ORDER BY customers.name ASC
";

/// A customer option for the invoice form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct CustomerField {
    /// Customer ID.
    pub id: Uuid,
    /// Customer name.
    pub name: String,
}

/// A customer with aggregated invoice totals, amounts formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredCustomer {
    /// Customer ID.
    pub id: Uuid,
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Avatar path.
    pub image_url: String,
    /// Number of invoices billed to the customer.
    pub total_invoices: i64,
    /// Sum of pending invoices as a currency string.
    pub total_pending: String,
    /// Sum of paid invoices as a currency string.
    pub total_paid: String,
}

#[derive(Debug, FromQueryResult)]
struct CustomerTotalsRow {
    id: Uuid,
    name: String,
    email: String,
    image_url: String,
    total_invoices: i64,
    total_pending: i64,
    total_paid: i64,
}

impl From<CustomerTotalsRow> for FilteredCustomer {
    fn from(row: CustomerTotalsRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: format_currency(row.total_pending),
            total_paid: format_currency(row.total_paid),
        }
    }
}

/// Customer repository for read queries.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches every customer's ID and name, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch all customers.` if the query fails.
    pub async fn fetch_customers(&self) -> Result<Vec<CustomerField>, DatabaseError> {
        customers::Entity::find()
            .select_only()
            .column(customers::Column::Id)
            .column(customers::Column::Name)
            .order_by_asc(customers::Column::Name)
            .into_model::<CustomerField>()
            .all(&self.db)
            .await
            .map_err(DatabaseError::wrap("Failed to fetch all customers."))
    }

    /// Fetches customers whose name or email contains `query` (case-insensitive),
    /// with invoice count and pending/paid totals.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch customer table.` if the query fails.
    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
    ) -> Result<Vec<FilteredCustomer>, DatabaseError> {
        let rows = CustomerTotalsRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            FILTERED_CUSTOMERS_SQL,
            [contains_pattern(query).into()],
        ))
        .all(&self.db)
        .await
        .map_err(DatabaseError::wrap("Failed to fetch customer table."))?;

        Ok(rows.into_iter().map(FilteredCustomer::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_are_formatted() {
        let row = CustomerTotalsRow {
            id: Uuid::nil(),
            name: "Delba de Oliveira".to_string(),
            email: "delba@oliveira.com".to_string(),
            image_url: "/customers/delba-de-oliveira.png".to_string(),
            total_invoices: 3,
            total_pending: 150_050,
            total_paid: 0,
        };

        let customer = FilteredCustomer::from(row);
        assert_eq!(customer.total_pending, "$1,500.50");
        assert_eq!(customer.total_paid, "$0.00");
        assert_eq!(customer.total_invoices, 3);
    }
}
