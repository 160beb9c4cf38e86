//! Validated inputs for every entity.
//!
//! Text rules (presence, length, e-mail syntax) are declared with `validator`
//! attributes. Numeric and cross-field rules live in `check_fields`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::errors::FieldErrors;
use super::validation::{
    validate_bic, validate_iban, validate_price, validate_quantity, validate_tax,
};

/// Shared entry point: derived rules first, then the hand-written ones.
pub trait CheckedInput: Validate {
    fn check_fields(&self, _errors: &mut FieldErrors) {}

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };
        self.check_fields(&mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddressInput {
    #[validate(length(min = 1, max = 255))]
    pub street: String,
    #[validate(length(min = 1, max = 255))]
    pub number: String,
    #[validate(length(min = 1, max = 255))]
    pub city: String,
    #[validate(length(min = 1, max = 255))]
    pub country: String,
}

impl CheckedInput for AddressInput {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerInput {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(email, length(min = 1, max = 254))]
    pub email: String,
    pub address_id: i32,
}

impl CheckedInput for CustomerInput {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VendorInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub company_name: String,
    pub address_id: i32,
}

impl CheckedInput for VendorInput {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BankAccountInput {
    pub vendor_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub bank_name: String,
    /// Normalised form, see [`super::validation::normalize_iban`].
    #[validate(length(min = 1, max = 34))]
    pub iban: String,
    #[validate(length(min = 1, max = 11))]
    pub bic: String,
}

impl CheckedInput for BankAccountInput {
    fn check_fields(&self, errors: &mut FieldErrors) {
        if !self.iban.is_empty() && !errors.contains("iban") {
            errors.record("iban", validate_iban(&self.iban));
        }
        if !self.bic.is_empty() && !errors.contains("bic") {
            errors.record("bic", validate_bic(&self.bic));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct InvoiceInput {
    pub invoice_number: i32,
    pub date: DateTime<Utc>,
    pub vendor_id: i32,
    pub customer_id: i32,
}

impl CheckedInput for InvoiceInput {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct InvoiceItemInput {
    pub invoice_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub price: Decimal,
    pub tax: f64,
}

impl CheckedInput for InvoiceItemInput {
    fn check_fields(&self, errors: &mut FieldErrors) {
        errors.record("quantity", validate_quantity(self.quantity));
        errors.record("price", validate_price(&self.price));
        errors.record("tax", validate_tax(self.tax));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> InvoiceItemInput {
        InvoiceItemInput {
            invoice_id: 1,
            name: "Security Services".to_string(),
            description: "Implementation of a firewall".to_string(),
            quantity: 1,
            price: Decimal::from(100),
            tax: 0.19,
        }
    }

    #[test]
    fn valid_item_passes() {
        assert!(item().check().is_ok());
    }

    #[test]
    fn each_numeric_rule_is_reported_on_its_field() {
        let mut bad = item();
        bad.quantity = -1;
        bad.tax = 1.19;
        let errors = bad.check().unwrap_err();
        assert!(errors.contains("quantity"));
        assert!(errors.contains("tax"));
        assert!(!errors.contains("price"));
    }

    #[test]
    fn empty_address_fields_are_required() {
        let input = AddressInput {
            street: String::new(),
            number: "45".to_string(),
            city: "Capital".to_string(),
            country: String::new(),
        };
        let errors = input.check().unwrap_err();
        assert_eq!(errors.get("street"), ["This field is required."]);
        assert_eq!(errors.get("country"), ["This field is required."]);
        assert!(!errors.contains("city"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let input = CustomerInput {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe.com".to_string(),
            address_id: 1,
        };
        let errors = input.check().unwrap_err();
        assert_eq!(errors.get("email"), ["Enter a valid email address."]);
    }

    #[test]
    fn bank_account_checks_iban_checksum() {
        let input = BankAccountInput {
            vendor_id: 1,
            bank_name: "Commerzbank".to_string(),
            iban: "DE89370400440532013001".to_string(),
            bic: "COBADEFFXXX".to_string(),
        };
        let errors = input.check().unwrap_err();
        assert_eq!(errors.get("iban"), ["Enter a valid IBAN."]);
        assert!(!errors.contains("bic"));
    }
}
