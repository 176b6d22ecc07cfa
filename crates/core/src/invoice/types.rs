//! Invoice value types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicer_shared::types::CustomerId;

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting payment.
    Pending,
    /// Settled.
    Paid,
}

impl InvoiceStatus {
    /// Returns the value stored in the `status` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Unknown invoice status: {s}")),
        }
    }
}

/// A validated invoice ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    /// Billed customer.
    pub customer_id: CustomerId,
    /// Amount in cents.
    pub amount_cents: i32,
    /// Payment status.
    pub status: InvoiceStatus,
    /// Issue date, assigned by the server.
    pub date: NaiveDate,
}

/// Validated changes applied to an existing invoice. The date is never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    /// Billed customer.
    pub customer_id: CustomerId,
    /// Amount in cents.
    pub amount_cents: i32,
    /// Payment status.
    pub status: InvoiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for status in [InvoiceStatus::Pending, InvoiceStatus::Paid] {
            assert_eq!(InvoiceStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert!(InvoiceStatus::from_str("Paid").is_err());
        assert!(InvoiceStatus::from_str("overdue").is_err());
        assert!(InvoiceStatus::from_str("").is_err());
    }
}
