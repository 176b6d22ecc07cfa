//! Revenue repository for the monthly revenue chart.

use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;

use super::error::DatabaseError;
use crate::entities::revenue;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Revenue for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// Three-letter month name.
    pub month: String,
    /// Revenue in whole dollars.
    pub revenue: i32,
}

/// Read-only access to precomputed monthly revenue.
#[derive(Debug, Clone)]
pub struct RevenueRepository {
    db: DatabaseConnection,
}

impl RevenueRepository {
    /// Creates a new revenue repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches all revenue rows in calendar order.
    ///
    /// # Errors
    ///
    /// Returns `Failed to fetch revenue data.` if the query fails.
    pub async fn fetch_revenue(&self) -> Result<Vec<MonthlyRevenue>, DatabaseError> {
        let rows = revenue::Entity::find()
            .all(&self.db)
            .await
            .map_err(DatabaseError::wrap("Failed to fetch revenue data."))?;

        Ok(in_calendar_order(rows))
    }
}

/// Sorts rows January first; unrecognised month names go last, alphabetically.
fn in_calendar_order(rows: Vec<revenue::Model>) -> Vec<MonthlyRevenue> {
    let mut months: Vec<MonthlyRevenue> = rows
        .into_iter()
        .map(|row| MonthlyRevenue {
            month: row.month,
            revenue: row.revenue,
        })
        .collect();

    months.sort_by(|a, b| {
        month_position(&a.month)
            .cmp(&month_position(&b.month))
            .then_with(|| a.month.cmp(&b.month))
    });
    months
}

fn month_position(month: &str) -> usize {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month.trim()))
        .unwrap_or(MONTHS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: &str, revenue: i32) -> revenue::Model {
        revenue::Model {
            month: month.to_string(),
            revenue,
        }
    }

    #[test]
    fn test_calendar_order() {
        let ordered = in_calendar_order(vec![
            row("Dec", 4800),
            row("Jan", 2000),
            row("Jun", 3200),
            row("Feb", 1800),
        ]);

        let months: Vec<&str> = ordered.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["Jan", "Feb", "Jun", "Dec"]);
        assert_eq!(ordered[0].revenue, 2000);
    }

    #[test]
    fn test_unknown_months_sort_last() {
        let ordered = in_calendar_order(vec![row("Q1", 1), row("Mar", 2), row("Abc", 3)]);

        let months: Vec<&str> = ordered.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["Mar", "Abc", "Q1"]);
    }
}
