use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{finish, parse_choice, parse_date, parse_int, Choice, FieldKind, FormField};
use crate::domain::{FieldErrors, Invoice, InvoiceInput};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceForm {
    pub invoice_number: String,
    /// `YYYY-MM-DD` or RFC 3339; blank means now
    pub date: String,
    /// Vendor id
    pub vendor: String,
    /// Customer id
    pub customer: String,
}

impl InvoiceForm {
    pub fn from_record(invoice: &Invoice) -> Self {
        Self {
            invoice_number: invoice.invoice_number.to_string(),
            date: invoice.date.format("%Y-%m-%d").to_string(),
            vendor: invoice.vendor_id.to_string(),
            customer: invoice.customer_id.to_string(),
        }
    }

    pub fn clean(&self) -> Result<InvoiceInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let invoice_number = parse_int(&mut errors, "invoice_number", &self.invoice_number);
        let date = parse_date(&mut errors, "date", &self.date);
        let vendor_id = parse_choice(&mut errors, "vendor", &self.vendor);
        let customer_id = parse_choice(&mut errors, "customer", &self.customer);

        let input = InvoiceInput {
            invoice_number: invoice_number.unwrap_or_default(),
            date: date.unwrap_or_default(),
            vendor_id: vendor_id.unwrap_or_default(),
            customer_id: customer_id.unwrap_or_default(),
        };
        finish(input, errors)
    }

    /// True when the posted date is the plain calendar day of `stored`.
    ///
    /// The edit form only shows the day, so re-posting it unchanged must not
    /// move the stored timestamp to midnight.
    pub fn keeps_day_of(&self, stored: DateTime<Utc>) -> bool {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .is_ok_and(|day| day == stored.date_naive())
    }

    pub fn fields(
        &self,
        errors: &FieldErrors,
        vendors: Vec<Choice>,
        customers: Vec<Choice>,
    ) -> Vec<FormField> {
        vec![
            FormField::new("invoice_number", "Invoice number", FieldKind::Number, &self.invoice_number, errors)
                .step("1"),
            FormField::new("date", "Date", FieldKind::Date, &self.date, errors).optional(),
            FormField::new("vendor", "Vendor", FieldKind::Select, &self.vendor, errors)
                .choices(vendors),
            FormField::new("customer", "Customer", FieldKind::Select, &self.customer, errors)
                .choices(customers),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_day_keeps_stored_time() {
        let stored = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        let mut form = InvoiceForm {
            invoice_number: "1".to_string(),
            date: "2024-03-01".to_string(),
            vendor: "1".to_string(),
            customer: "1".to_string(),
        };
        assert!(form.keeps_day_of(stored));

        form.date = "2024-03-02".to_string();
        assert!(!form.keeps_day_of(stored));

        form.date = String::new();
        assert!(!form.keeps_day_of(stored));
    }
}
