use serde::{Deserialize, Serialize};

use super::{finish, parse_choice, text, Choice, FieldKind, FormField};
use crate::domain::{Customer, CustomerInput, FieldErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Address id
    pub address: String,
}

impl CustomerForm {
    pub fn from_record(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            address: customer.address_id.to_string(),
        }
    }

    pub fn clean(&self) -> Result<CustomerInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let address_id = parse_choice(&mut errors, "address", &self.address);

        let input = CustomerInput {
            first_name: text(&self.first_name),
            last_name: text(&self.last_name),
            email: text(&self.email),
            address_id: address_id.unwrap_or_default(),
        };
        finish(input, errors)
    }

    pub fn fields(&self, errors: &FieldErrors, addresses: Vec<Choice>) -> Vec<FormField> {
        vec![
            FormField::new("first_name", "First name", FieldKind::Text, &self.first_name, errors),
            FormField::new("last_name", "Last name", FieldKind::Text, &self.last_name, errors),
            FormField::new("email", "E-mail", FieldKind::Email, &self.email, errors),
            FormField::new("address", "Address", FieldKind::Select, &self.address, errors)
                .choices(addresses),
        ]
    }
}
