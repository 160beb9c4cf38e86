//! Invoice line computations.
//!
//! Totals are derived on access and never stored.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// `price × quantity`, before tax.
pub fn net_total(price: Decimal, quantity: i32) -> Decimal {
    price * Decimal::from(quantity)
}

/// `net_total × (1 + tax)`.
///
/// The tax rate is converted from its float form using the shortest decimal
/// that round-trips, so `0.19` contributes exactly `0.19`.
pub fn total(price: Decimal, quantity: i32, tax: f64) -> Decimal {
    net_total(price, quantity) * (Decimal::ONE + tax_rate(tax))
}

pub fn tax_rate(tax: f64) -> Decimal {
    // f64's Display is the shortest round-trip form
    tax.to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(tax))
        .unwrap_or_default()
}

/// Sums over a set of lines, used for invoice footers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct InvoiceTotals {
    pub net_total: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    pub fn add_line(&mut self, price: Decimal, quantity: i32, tax: f64) {
        let net = net_total(price, quantity);
        let gross = total(price, quantity, tax);
        self.net_total += net;
        self.tax_total += gross - net;
        self.total += gross;
    }
}
