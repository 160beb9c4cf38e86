use serde::{Deserialize, Serialize};

use super::{finish, parse_choice, text, Choice, FieldKind, FormField};
use crate::domain::validation::normalize_iban;
use crate::domain::{BankAccount, BankAccountInput, FieldErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BankAccountForm {
    /// Vendor id
    pub vendor: String,
    pub bank_name: String,
    pub iban: String,
    pub bic: String,
}

impl BankAccountForm {
    pub fn from_record(account: &BankAccount) -> Self {
        Self {
            vendor: account.vendor_id.to_string(),
            bank_name: account.bank_name.clone(),
            iban: account.iban.clone(),
            bic: account.bic.clone(),
        }
    }

    pub fn clean(&self) -> Result<BankAccountInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let vendor_id = parse_choice(&mut errors, "vendor", &self.vendor);

        let input = BankAccountInput {
            vendor_id: vendor_id.unwrap_or_default(),
            bank_name: text(&self.bank_name),
            iban: normalize_iban(&self.iban),
            bic: text(&self.bic).to_uppercase(),
        };
        finish(input, errors)
    }

    pub fn fields(&self, errors: &FieldErrors, vendors: Vec<Choice>) -> Vec<FormField> {
        vec![
            FormField::new("vendor", "Vendor", FieldKind::Select, &self.vendor, errors)
                .choices(vendors),
            FormField::new("bank_name", "Bank", FieldKind::Text, &self.bank_name, errors),
            FormField::new("iban", "IBAN", FieldKind::Text, &self.iban, errors),
            FormField::new("bic", "BIC", FieldKind::Text, &self.bic, errors),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iban_is_stored_compact() {
        let form = BankAccountForm {
            vendor: "1".to_string(),
            bank_name: "Commerzbank".to_string(),
            iban: "de89 3704 0044 0532 0130 00".to_string(),
            bic: "cobadeff".to_string(),
        };
        let input = form.clean().unwrap();
        assert_eq!(input.iban, "DE89370400440532013000");
        assert_eq!(input.bic, "COBADEFF");
    }
}
