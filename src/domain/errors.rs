//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// One or more submitted fields were rejected
    #[error("Validation error: {0}")]
    Validation(FieldErrors),
    /// The record is still referenced by other records
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Template or document rendering failed
    #[error("Render error: {0}")]
    Render(String),
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                DomainError::Conflict(format!("Duplicate record: {}", detail))
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(detail)) => {
                DomainError::Conflict(format!("Record is still referenced: {}", detail))
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::Validation(errors)
    }
}

/// Error messages keyed by form field name.
///
/// Field order is stable so re-rendered forms list errors deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Adds `other`'s messages only for fields that have none yet.
    pub fn merge_new_fields(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_insert(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records the outcome of a single-field validator.
    pub fn record(&mut self, field: &str, result: Result<(), validator::ValidationError>) {
        if let Err(err) = result {
            self.add(field, describe(&err));
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            for err in errs.iter() {
                out.add(&field, describe(err));
            }
        }
        out
    }
}

/// Human readable message for a validator error, phrased like the form layer.
fn describe(err: &validator::ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }

    let param = |name: &str| err.params.get(name).map(|v| v.to_string());

    match err.code.as_ref() {
        "length" => {
            let empty = err
                .params
                .get("value")
                .and_then(|v| v.as_str())
                .is_some_and(str::is_empty);
            match param("max") {
                Some(max) if !empty => format!("Ensure this value has at most {} characters.", max),
                _ => "This field is required.".to_string(),
            }
        }
        "email" => "Enter a valid email address.".to_string(),
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => {
                format!("Ensure this value is between {} and {}.", min, max)
            }
            (Some(min), None) => {
                format!("Ensure this value is greater than or equal to {}.", min)
            }
            (None, Some(max)) => format!("Ensure this value is less than or equal to {}.", max),
            (None, None) => "Value out of range.".to_string(),
        },
        code => format!("Invalid value ({}).", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_messages_from_both_sides() {
        let mut a = FieldErrors::new();
        a.add("price", "Enter a number.");
        let mut b = FieldErrors::new();
        b.add("price", "Price must be a finite number.");
        b.add("tax", "out of range");

        a.merge(b);

        assert_eq!(a.get("price").len(), 2);
        assert!(a.contains("tax"));
        assert!(a.get("quantity").is_empty());
    }

    #[test]
    fn display_lists_every_field() {
        let mut errors = FieldErrors::new();
        errors.add("city", "This field is required.");
        errors.add("street", "This field is required.");

        assert_eq!(
            errors.to_string(),
            "city: This field is required.; street: This field is required."
        );
    }
}
