use serde::{Deserialize, Serialize};

use super::{finish, parse_choice, parse_float, parse_int, parse_price, text, Choice, FieldKind, FormField};
use crate::domain::{FieldErrors, InvoiceItem, InvoiceItemInput};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceItemForm {
    /// Invoice id
    pub invoice: String,
    pub name: String,
    pub description: String,
    pub quantity: String,
    pub price: String,
    pub tax: String,
}

impl InvoiceItemForm {
    pub fn from_record(item: &InvoiceItem) -> Self {
        Self {
            invoice: item.invoice_id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            price: item.price.to_string(),
            tax: item.tax.to_string(),
        }
    }

    pub fn clean(&self) -> Result<InvoiceItemInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let invoice_id = parse_choice(&mut errors, "invoice", &self.invoice);
        let quantity = parse_int(&mut errors, "quantity", &self.quantity);
        let price = parse_price(&mut errors, "price", &self.price);
        let tax = parse_float(&mut errors, "tax", &self.tax);

        let input = InvoiceItemInput {
            invoice_id: invoice_id.unwrap_or_default(),
            name: text(&self.name),
            description: self.description.trim().to_string(),
            quantity: quantity.unwrap_or_default(),
            price: price.unwrap_or_default(),
            tax: tax.unwrap_or_default(),
        };
        finish(input, errors)
    }

    pub fn fields(&self, errors: &FieldErrors, invoices: Vec<Choice>) -> Vec<FormField> {
        vec![
            FormField::new("invoice", "Invoice", FieldKind::Select, &self.invoice, errors)
                .choices(invoices),
            FormField::new("name", "Name", FieldKind::Text, &self.name, errors),
            FormField::new("description", "Description", FieldKind::Textarea, &self.description, errors)
                .optional(),
            FormField::new("quantity", "Quantity", FieldKind::Number, &self.quantity, errors)
                .step("1"),
            FormField::new("price", "Unit price", FieldKind::Number, &self.price, errors)
                .step("0.01"),
            FormField::new("tax", "Tax rate", FieldKind::Number, &self.tax, errors)
                .step("0.01"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> InvoiceItemForm {
        InvoiceItemForm {
            invoice: "1".to_string(),
            name: "Security Services".to_string(),
            description: "Implementation of a firewall".to_string(),
            quantity: "1".to_string(),
            price: "100.0".to_string(),
            tax: "0.19".to_string(),
        }
    }

    #[test]
    fn clean_submission_yields_input() {
        let input = form().clean().unwrap();
        assert_eq!(input.quantity, 1);
        assert_eq!(input.price, rust_decimal::Decimal::from(100));
        assert_eq!(input.tax, 0.19);
    }

    #[test]
    fn negative_quantity_is_a_field_error() {
        let mut f = form();
        f.quantity = "-1".to_string();
        let errors = f.clean().unwrap_err();
        assert_eq!(
            errors.get("quantity"),
            ["Ensure this value is greater than or equal to 0."]
        );
    }

    #[test]
    fn parse_errors_are_not_doubled_by_rule_errors() {
        let mut f = form();
        f.price = "inf".to_string();
        f.tax = "".to_string();
        let errors = f.clean().unwrap_err();
        assert_eq!(errors.get("price"), ["Price must be a finite number."]);
        assert_eq!(errors.get("tax"), [super::super::REQUIRED]);
    }
}
