//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every read issues its statements sequentially and surfaces the first fault
//! as a `DatabaseError`; nothing is retried.

pub mod customer;
pub mod dashboard;
pub mod error;
pub mod invoice;
pub mod revenue;
pub mod user;

pub use customer::{CustomerField, CustomerRepository, FilteredCustomer};
pub use dashboard::{CardData, DashboardRepository};
pub use error::DatabaseError;
pub use invoice::{FilteredInvoice, InvoiceForEdit, InvoiceRepository, LatestInvoice};
pub use revenue::{MonthlyRevenue, RevenueRepository};
pub use user::UserRepository;

/// Builds the `%query%` pattern used by the case-insensitive search filters.
pub(crate) fn contains_pattern(query: &str) -> String {
    format!("%{query}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("Lee"), "%Lee%");
        assert_eq!(contains_pattern("2022-12"), "%2022-12%");
        assert_eq!(contains_pattern(""), "%%");
    }
}
