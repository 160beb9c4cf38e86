//! Field validators shared by the input structs.
//!
//! Messages follow the wording the form layer shows next to each field.

use std::borrow::Cow;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use validator::ValidationError;

/// Smallest accepted unit price.
pub const PRICE_MIN: Decimal = Decimal::from_parts(1_000_000, 0, 0, true, 0);
/// Largest accepted unit price.
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Fractional digits stored for a price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;
/// Total digits stored for a price.
pub const PRICE_MAX_DIGITS: u32 = 19;

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.scale() > PRICE_DECIMAL_PLACES && price.normalize().scale() > PRICE_DECIMAL_PLACES {
        return Err(error(
            "decimal_places",
            format!(
                "Ensure that there are no more than {} decimal places.",
                PRICE_DECIMAL_PLACES
            ),
        ));
    }

    let integer_digits = price.abs().trunc().to_string().trim_start_matches('0').len() as u32;
    if integer_digits + PRICE_DECIMAL_PLACES > PRICE_MAX_DIGITS {
        return Err(error(
            "max_digits",
            format!(
                "Ensure that there are no more than {} digits in total.",
                PRICE_MAX_DIGITS
            ),
        ));
    }

    if *price < PRICE_MIN {
        return Err(error(
            "range",
            format!("Ensure this value is greater than or equal to {}.", PRICE_MIN),
        ));
    }
    if *price > PRICE_MAX {
        return Err(error(
            "range",
            format!("Ensure this value is less than or equal to {}.", PRICE_MAX),
        ));
    }
    Ok(())
}

/// Converts a float price into its stored decimal form.
///
/// Infinite and not-a-number values have no decimal representation and are rejected.
pub fn price_from_f64(value: f64) -> Result<Decimal, ValidationError> {
    if !value.is_finite() {
        return Err(error("finite", "Price must be a finite number."));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        error(
            "max_digits",
            format!(
                "Ensure that there are no more than {} digits in total.",
                PRICE_MAX_DIGITS
            ),
        )
    })
}

pub fn validate_tax(tax: f64) -> Result<(), ValidationError> {
    if tax.is_nan() {
        return Err(error("finite", "Tax must be a number."));
    }
    if tax < 0.0 {
        return Err(error("range", "Ensure this value is greater than or equal to 0.0."));
    }
    if tax > 1.0 {
        return Err(error("range", "Ensure this value is less than or equal to 1.0."));
    }
    Ok(())
}

pub fn validate_quantity(quantity: i32) -> Result<(), ValidationError> {
    if quantity < 0 {
        return Err(error("range", "Ensure this value is greater than or equal to 0."));
    }
    Ok(())
}

/// Strips blanks and upper-cases an IBAN as it is stored.
pub fn normalize_iban(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// ISO 13616 structural and mod-97 check on a normalised IBAN.
pub fn validate_iban(iban: &str) -> Result<(), ValidationError> {
    let invalid = || error("iban", "Enter a valid IBAN.");

    if !(15..=34).contains(&iban.len()) || !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid());
    }
    let bytes = iban.as_bytes();
    if !bytes[0].is_ascii_uppercase()
        || !bytes[1].is_ascii_uppercase()
        || !bytes[2].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
    {
        return Err(invalid());
    }

    let rearranged = iban[4..].chars().chain(iban[..4].chars());
    let mut remainder: u32 = 0;
    for c in rearranged {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return Err(invalid()),
        };
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }

    if remainder == 1 { Ok(()) } else { Err(invalid()) }
}

pub fn validate_bic(bic: &str) -> Result<(), ValidationError> {
    let well_formed = matches!(bic.len(), 8 | 11)
        && bic.chars().all(|c| c.is_ascii_alphanumeric())
        && bic[..6].chars().all(|c| c.is_ascii_alphabetic());
    if well_formed {
        Ok(())
    } else {
        Err(error("bic", "Enter a valid BIC."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn price_bounds_are_inclusive() {
        assert!(validate_price(&PRICE_MAX).is_ok());
        assert!(validate_price(&PRICE_MIN).is_ok());
        assert!(validate_price(&Decimal::from_str("1000000.01").unwrap()).is_err());
        assert!(validate_price(&Decimal::from_str("-1000000.01").unwrap()).is_err());
    }

    #[test]
    fn price_rejects_third_decimal_place() {
        assert!(validate_price(&Decimal::from_str("10.999").unwrap()).is_err());
        // trailing zeros do not count
        assert!(validate_price(&Decimal::from_str("10.500").unwrap()).is_ok());
    }

    #[test]
    fn non_finite_floats_have_no_price() {
        assert!(price_from_f64(f64::INFINITY).is_err());
        assert!(price_from_f64(f64::NEG_INFINITY).is_err());
        assert!(price_from_f64(f64::NAN).is_err());
        assert_eq!(price_from_f64(100.0).unwrap(), Decimal::from(100));
    }

    #[test]
    fn tax_must_be_a_rate() {
        assert!(validate_tax(0.0).is_ok());
        assert!(validate_tax(1.0).is_ok());
        assert!(validate_tax(-0.19).is_err());
        assert!(validate_tax(1.19).is_err());
        assert!(validate_tax(f64::NAN).is_err());
    }

    #[test]
    fn iban_checksum() {
        assert!(validate_iban("DE89370400440532013000").is_ok());
        assert!(validate_iban("GB82WEST12345698765432").is_ok());
        assert!(validate_iban("DE89370400440532013001").is_err());
        assert!(validate_iban("DE8937").is_err());
        assert_eq!(
            normalize_iban("de89 3704 0044 0532 0130 00"),
            "DE89370400440532013000"
        );
    }

    #[test]
    fn bic_shape() {
        assert!(validate_bic("COBADEFF").is_ok());
        assert!(validate_bic("COBADEFFXXX").is_ok());
        assert!(validate_bic("COBA").is_err());
        assert!(validate_bic("12BADEFF").is_err());
    }
}
