//! Display formatting for calendar dates.

use chrono::NaiveDate;

/// Formats a date the way the invoice tables display it, e.g. `Dec 6, 2022`.
#[must_use]
pub fn format_date_to_local(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
