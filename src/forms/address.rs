use serde::{Deserialize, Serialize};

use super::{finish, text, FieldKind, FormField};
use crate::domain::{Address, AddressInput, FieldErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressForm {
    pub street: String,
    pub number: String,
    pub city: String,
    pub country: String,
}

impl AddressForm {
    pub fn from_record(address: &Address) -> Self {
        Self {
            street: address.street.clone(),
            number: address.number.clone(),
            city: address.city.clone(),
            country: address.country.clone(),
        }
    }

    pub fn clean(&self) -> Result<AddressInput, FieldErrors> {
        let input = AddressInput {
            street: text(&self.street),
            number: text(&self.number),
            city: text(&self.city),
            country: text(&self.country),
        };
        finish(input, FieldErrors::new())
    }

    pub fn fields(&self, errors: &FieldErrors) -> Vec<FormField> {
        vec![
            FormField::new("street", "Street", FieldKind::Text, &self.street, errors),
            FormField::new("number", "Number", FieldKind::Text, &self.number, errors),
            FormField::new("city", "City", FieldKind::Text, &self.city, errors),
            FormField::new("country", "Country", FieldKind::Text, &self.country, errors),
        ]
    }
}
