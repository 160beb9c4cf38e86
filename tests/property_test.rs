//! Property checks for the line computations and item validation

use invoicer::domain::inputs::CheckedInput;
use invoicer::domain::totals::{net_total, total};
use invoicer::domain::validation::{price_from_f64, validate_price};
use invoicer::domain::{InvoiceItemInput, InvoiceTotals};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(quantity: i32, price: Decimal, tax: f64) -> InvoiceItemInput {
    InvoiceItemInput {
        invoice_id: 1,
        name: "Security Services".to_string(),
        description: String::new(),
        quantity,
        price,
        tax,
    }
}

/// Prices with at most two fractional digits inside the accepted range
fn valid_price() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..=100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Tax rates in whole percent, 0% to 100%
fn valid_tax() -> impl Strategy<Value = f64> {
    (0u32..=100).prop_map(|percent| f64::from(percent) / 100.0)
}

#[test]
fn example_line_total() {
    assert_eq!(total(dec!(100.0), 1, 0.19), dec!(119));
}

proptest! {
    #[test]
    fn net_total_is_price_times_quantity(price in valid_price(), quantity in 0i32..10_000) {
        prop_assert_eq!(net_total(price, quantity), price * Decimal::from(quantity));
    }

    #[test]
    fn total_adds_tax_on_net(price in valid_price(), quantity in 0i32..10_000, percent in 0u32..=100) {
        let tax = f64::from(percent) / 100.0;
        let expected = net_total(price, quantity) * (Decimal::ONE + Decimal::new(percent.into(), 2));
        prop_assert_eq!(total(price, quantity, tax), expected);
    }

    #[test]
    fn total_never_below_net_for_positive_prices(
        cents in 0i64..=100_000_000,
        quantity in 0i32..10_000,
        tax in valid_tax(),
    ) {
        let price = Decimal::new(cents, 2);
        prop_assert!(total(price, quantity, tax) >= net_total(price, quantity));
    }

    #[test]
    fn footer_total_is_net_plus_tax(
        lines in prop::collection::vec((valid_price(), 0i32..1_000, valid_tax()), 0..20),
    ) {
        let mut totals = InvoiceTotals::default();
        for (price, quantity, tax) in &lines {
            totals.add_line(*price, *quantity, *tax);
        }
        prop_assert_eq!(totals.total, totals.net_total + totals.tax_total);
    }

    #[test]
    fn valid_items_pass(quantity in 0i32..10_000, price in valid_price(), tax in valid_tax()) {
        prop_assert!(item(quantity, price, tax).check().is_ok());
    }

    #[test]
    fn negative_quantity_is_rejected(quantity in i32::MIN..0, price in valid_price()) {
        let errors = item(quantity, price, 0.19).check().unwrap_err();
        prop_assert!(errors.contains("quantity"));
    }

    #[test]
    fn negative_tax_is_rejected(tax in -1_000.0f64..-0.0001) {
        let errors = item(1, dec!(100), tax).check().unwrap_err();
        prop_assert!(errors.contains("tax"));
    }

    #[test]
    fn tax_above_one_is_rejected(tax in 1.0001f64..1_000.0) {
        let errors = item(1, dec!(100), tax).check().unwrap_err();
        prop_assert!(errors.contains("tax"));
    }

    #[test]
    fn prices_outside_range_are_rejected(cents in 100_000_001i64..1_000_000_000_000) {
        prop_assert!(validate_price(&Decimal::new(cents, 2)).is_err());
        prop_assert!(validate_price(&Decimal::new(-cents, 2)).is_err());
    }

    #[test]
    fn three_decimal_places_are_rejected(mills in -100_000_000i64..100_000_000) {
        prop_assume!(mills % 10 != 0);
        prop_assert!(validate_price(&Decimal::new(mills, 3)).is_err());
    }
}

#[test]
fn non_finite_prices_are_rejected() {
    for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let err = price_from_f64(value).unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Price must be a finite number.")
        );
    }
}
