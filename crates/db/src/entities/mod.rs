//! `SeaORM` entities for the dashboard schema.

pub mod customers;
pub mod invoices;
pub mod revenue;
pub mod users;
