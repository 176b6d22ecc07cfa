//! Validation of submitted invoice forms.
//!
//! Forms arrive as string-keyed maps straight from an HTML submission. Only
//! `customerId`, `amount`, and `status` are read; `id` and `date` are server
//! assigned and any client-supplied values are ignored.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use invoicer_shared::types::{CustomerId, dollars_to_cents};

use super::types::{InvoiceChanges, InvoiceStatus, NewInvoice};

/// Raw form submission.
pub type FormFields = HashMap<String, String>;

const CUSTOMER_ID: &str = "customerId";
const AMOUNT: &str = "amount";
const STATUS: &str = "status";

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Records a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns the messages recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns true if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the fields that failed, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Borrowed view of the invoice fields of a form submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceForm<'a> {
    /// Selected customer.
    pub customer_id: Option<&'a str>,
    /// Dollar amount as typed.
    pub amount: Option<&'a str>,
    /// Selected status.
    pub status: Option<&'a str>,
}

/// An invoice form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInvoice {
    /// Billed customer.
    pub customer_id: CustomerId,
    /// Dollar amount as submitted.
    pub amount: Decimal,
    /// `round(amount * 100)`.
    pub amount_cents: i32,
    /// Payment status.
    pub status: InvoiceStatus,
}

impl<'a> InvoiceForm<'a> {
    /// Picks the invoice fields out of a submission.
    #[must_use]
    pub fn from_fields(fields: &'a FormFields) -> Self {
        Self {
            customer_id: fields.get(CUSTOMER_ID).map(String::as_str),
            amount: fields.get(AMOUNT).map(String::as_str),
            status: fields.get(STATUS).map(String::as_str),
        }
    }

    /// Validates every field, collecting all failures rather than stopping at the first.
    pub fn validate(&self) -> Result<ValidatedInvoice, FieldErrors> {
        let mut errors = FieldErrors::default();

        let customer_id = present(self.customer_id).and_then(|raw| CustomerId::from_str(raw).ok());
        if customer_id.is_none() {
            errors.add(CUSTOMER_ID, "Please select a customer.");
        }

        let amount = present(self.amount).and_then(|raw| {
            Decimal::from_str(raw)
                .or_else(|_| Decimal::from_scientific(raw))
                .ok()
        });
        let amount_cents = match amount {
            None => {
                errors.add(AMOUNT, "Please enter a valid amount.");
                None
            }
            Some(amount) => {
                let cents = dollars_to_cents(amount).and_then(|c| i32::try_from(c).ok());
                if cents.is_none() {
                    errors.add(AMOUNT, "Amount is too large.");
                }
                cents
            }
        };

        let status = present(self.status).and_then(|raw| InvoiceStatus::from_str(raw).ok());
        if status.is_none() {
            errors.add(STATUS, "Please select an invoice status.");
        }

        match (customer_id, amount, amount_cents, status) {
            (Some(customer_id), Some(amount), Some(amount_cents), Some(status)) => {
                Ok(ValidatedInvoice {
                    customer_id,
                    amount,
                    amount_cents,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

impl ValidatedInvoice {
    /// Stamps the invoice with its issue date.
    #[must_use]
    pub fn into_new(self, date: chrono::NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
            date,
        }
    }

    /// Converts into changes for an existing invoice.
    #[must_use]
    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
        }
    }
}

/// Treats blank fields the same as missing ones.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_valid_form() {
        let form = fields(&[
            ("customerId", CUSTOMER),
            ("amount", "157.95"),
            ("status", "pending"),
        ]);

        let invoice = InvoiceForm::from_fields(&form).validate().unwrap();
        assert_eq!(invoice.customer_id.to_string(), CUSTOMER);
        assert_eq!(invoice.amount, dec!(157.95));
        assert_eq!(invoice.amount_cents, 15_795);
        assert_eq!(invoice.status, InvoiceStatus::Pending);
    }

    #[rstest]
    #[case("1e3", 100_000)]
    #[case("1.5E2", 15_000)]
    #[case("2.5e-1", 25)]
    fn test_scientific_amount_accepted(#[case] raw: &str, #[case] cents: i32) {
        let form = fields(&[
            ("customerId", CUSTOMER),
            ("amount", raw),
            ("status", "paid"),
        ]);

        let invoice = InvoiceForm::from_fields(&form).validate().unwrap();
        assert_eq!(invoice.amount_cents, cents);
    }

    #[test]
    fn test_server_assigned_fields_ignored() {
        let form = fields(&[
            ("id", "ignored"),
            ("date", "1999-01-01"),
            ("customerId", CUSTOMER),
            ("amount", "10"),
            ("status", "paid"),
        ]);

        let invoice = InvoiceForm::from_fields(&form).validate().unwrap();
        assert_eq!(invoice.amount_cents, 1_000);
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = InvoiceForm::from_fields(&FormFields::new())
            .validate()
            .unwrap_err();

        let failed: Vec<&str> = errors.fields().collect();
        assert_eq!(failed, vec!["amount", "customerId", "status"]);
        assert_eq!(
            errors.get("customerId").unwrap(),
            ["Please select a customer.".to_string()]
        );
    }

    #[rstest]
    #[case("customerId", "not-a-uuid")]
    #[case("customerId", "   ")]
    #[case("amount", "abc")]
    #[case("amount", "")]
    #[case("amount", "99999999999")]
    #[case("status", "overdue")]
    #[case("status", "PAID")]
    fn test_single_invalid_field(#[case] field: &str, #[case] value: &str) {
        let mut form = fields(&[
            ("customerId", CUSTOMER),
            ("amount", "12.5"),
            ("status", "paid"),
        ]);
        form.insert(field.to_string(), value.to_string());

        let errors = InvoiceForm::from_fields(&form).validate().unwrap_err();
        let failed: Vec<&str> = errors.fields().collect();
        assert_eq!(failed, vec![field]);
    }

    #[test]
    fn test_amount_rounds_to_cents() {
        let form = fields(&[
            ("customerId", CUSTOMER),
            ("amount", "0.125"),
            ("status", "paid"),
        ]);
        let invoice = InvoiceForm::from_fields(&form).validate().unwrap();
        assert_eq!(invoice.amount_cents, 13);
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::default();
        errors.add("amount", "Please enter a valid amount.");
        errors.add("amount", "Amount is too large.");
        errors.add("status", "Please select an invoice status.");

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({
                "amount": ["Please enter a valid amount.", "Amount is too large."],
                "status": ["Please select an invoice status."],
            })
        );
    }

    proptest! {
        /// Stored cents equal round(dollars * 100) for any two-decimal amount.
        #[test]
        fn prop_amount_cents(cents in 0i32..100_000_000) {
            let dollars = Decimal::new(i64::from(cents), 2);
            let form = fields(&[
                ("customerId", CUSTOMER),
                ("amount", &dollars.to_string()),
                ("status", "pending"),
            ]);
            let invoice = InvoiceForm::from_fields(&form).validate().unwrap();
            prop_assert_eq!(invoice.amount_cents, cents);
            prop_assert_eq!(invoice.amount, dollars);
        }
    }
}
