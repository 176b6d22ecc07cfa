//! Common types used across the application.

pub mod date;
pub mod id;
pub mod money;
pub mod pagination;

pub use date::format_date_to_local;
pub use id::*;
pub use money::{cents_to_dollars, dollars_to_cents, format_currency};
pub use pagination::{ITEMS_PER_PAGE, PageLink, PageRequest, generate_pagination, total_pages};
