//! Currency conversion and formatting.
//!
//! Amounts are persisted as integer cents. They become a `Decimal` dollar
//! value only when an edit form needs one, and a display string everywhere
//! else. Floating point is never involved.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Formats integer cents as US dollars, e.g. `150050` -> `$1,500.50`.
#[must_use]
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

/// Converts stored cents into a dollar amount with two decimal places.
#[must_use]
pub fn cents_to_dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts a dollar amount into cents, rounding half away from zero.
///
/// Returns `None` when the result does not fit in an `i64`.
#[must_use]
pub fn dollars_to_cents(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
