use serde::{Deserialize, Serialize};

use super::{finish, parse_choice, text, Choice, FieldKind, FormField};
use crate::domain::{FieldErrors, Vendor, VendorInput};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorForm {
    pub name: String,
    pub company_name: String,
    /// Address id
    pub address: String,
}

impl VendorForm {
    pub fn from_record(vendor: &Vendor) -> Self {
        Self {
            name: vendor.name.clone(),
            company_name: vendor.company_name.clone(),
            address: vendor.address_id.to_string(),
        }
    }

    pub fn clean(&self) -> Result<VendorInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let address_id = parse_choice(&mut errors, "address", &self.address);

        let input = VendorInput {
            name: text(&self.name),
            company_name: text(&self.company_name),
            address_id: address_id.unwrap_or_default(),
        };
        finish(input, errors)
    }

    pub fn fields(&self, errors: &FieldErrors, addresses: Vec<Choice>) -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text, &self.name, errors),
            FormField::new("company_name", "Company", FieldKind::Text, &self.company_name, errors),
            FormField::new("address", "Address", FieldKind::Select, &self.address, errors)
                .choices(addresses),
        ]
    }
}
