//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only record types, validated inputs, trait definitions and domain error types.

pub mod errors;
pub mod inputs;
pub mod repositories;
pub mod totals;
pub mod validation;

pub use errors::{DomainError, FieldErrors};
pub use inputs::*;
pub use repositories::*;
pub use totals::InvoiceTotals;
