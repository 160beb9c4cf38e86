//! Services Layer
//!
//! Document generation kept apart from the HTTP handlers.

pub mod pdf;

pub use pdf::render_invoice_pdf;
