//! Form-encoded submissions.
//!
//! Every field arrives as text. `clean` turns a submission into a validated
//! domain input or the per-field messages to show next to the inputs; rules
//! that need the database (foreign keys, invoice-number uniqueness) are
//! checked by the handlers afterwards.

pub mod address;
pub mod bank_account;
pub mod customer;
pub mod invoice;
pub mod invoice_item;
pub mod vendor;

pub use address::AddressForm;
pub use bank_account::BankAccountForm;
pub use customer::CustomerForm;
pub use invoice::InvoiceForm;
pub use invoice_item::InvoiceItemForm;
pub use vendor::VendorForm;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::inputs::CheckedInput;
use crate::domain::validation::price_from_f64;
use crate::domain::FieldErrors;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Select a valid choice.";

/// One `<option>` of a foreign-key select box
#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(id: i32, label: impl Into<String>) -> Self {
        Self {
            value: id.to_string(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Date,
}

/// Everything the form template needs to draw one input
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    /// Browser-side hint only; the server re-validates
    pub step: Option<&'static str>,
    pub errors: Vec<String>,
    pub choices: Vec<Choice>,
}

impl FormField {
    pub fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        value: &str,
        errors: &FieldErrors,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            value: value.to_string(),
            required: true,
            step: None,
            errors: errors.get(name).to_vec(),
            choices: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn step(mut self, step: &'static str) -> Self {
        self.step = Some(step);
        self
    }

    pub fn choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }
}

/// Runs the input's own rules, keeping parse errors already recorded per field.
pub(crate) fn finish<T: CheckedInput>(input: T, mut errors: FieldErrors) -> Result<T, FieldErrors> {
    if let Err(rule_errors) = input.check() {
        errors.merge_new_fields(rule_errors);
    }
    errors.into_result().map(|()| input)
}

pub(crate) fn text(raw: &str) -> String {
    raw.trim().to_string()
}

pub(crate) fn parse_int(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match raw.parse::<i32>() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.add(field, "Enter a whole number.");
            None
        }
    }
}

/// Foreign keys are posted as the referenced row id.
pub(crate) fn parse_choice(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match raw.parse::<i32>() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.add(field, INVALID_CHOICE);
            None
        }
    }
}

pub(crate) fn parse_float(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            errors.add(field, "Enter a number.");
            None
        }
    }
}

/// Decimal text first; float spellings are accepted but must be finite.
pub(crate) fn parse_price(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    if let Ok(price) = Decimal::from_str(raw) {
        return Some(price);
    }
    match raw.parse::<f64>() {
        Ok(v) => match price_from_f64(v) {
            Ok(price) => Some(price),
            Err(e) => {
                errors.record(field, Err(e));
                None
            }
        },
        Err(_) => {
            errors.add(field, "Enter a number.");
            None
        }
    }
}

/// Blank means "now"; otherwise a calendar date or an RFC 3339 timestamp.
pub(crate) fn parse_date(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Utc::now());
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
        Err(_) => {
            errors.add(field, "Enter a valid date.");
            None
        }
    }
}
