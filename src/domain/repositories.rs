//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::inputs::{
    AddressInput, BankAccountInput, CustomerInput, InvoiceInput, InvoiceItemInput, VendorInput,
};
use super::totals::{self, InvoiceTotals};
use super::DomainError;

/// Postal address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub id: i32,
    pub street: String,
    pub number: String,
    pub city: String,
    pub country: String,
}

impl Address {
    /// One-line form used in select boxes and lists.
    pub fn label(&self) -> String {
        format!("{} {}, {}, {}", self.street, self.number, self.city, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address_id: i32,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vendor {
    pub id: i32,
    pub name: String,
    pub company_name: String,
    pub address_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankAccount {
    pub id: i32,
    pub vendor_id: i32,
    pub bank_name: String,
    pub iban: String,
    pub bic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub id: i32,
    pub invoice_number: i32,
    pub date: DateTime<Utc>,
    pub vendor_id: i32,
    pub customer_id: i32,
}

/// Invoice line. Totals are computed, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceItem {
    pub id: i32,
    pub invoice_id: i32,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub price: Decimal,
    pub tax: f64,
}

impl InvoiceItem {
    pub fn net_total(&self) -> Decimal {
        totals::net_total(self.price, self.quantity)
    }

    pub fn total(&self) -> Decimal {
        totals::total(self.price, self.quantity, self.tax)
    }
}

/// Everything printed on an invoice document.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub invoice: Invoice,
    pub vendor: Vendor,
    pub vendor_address: Address,
    pub bank_accounts: Vec<BankAccount>,
    pub customer: Customer,
    pub customer_address: Address,
    pub items: Vec<InvoiceItem>,
}

impl InvoiceDocument {
    pub fn totals(&self) -> InvoiceTotals {
        let mut totals = InvoiceTotals::default();
        for item in &self.items {
            totals.add_line(item.price, item.quantity, item.tax);
        }
        totals
    }
}

/// Row counts shown on the start page
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overview {
    pub addresses: u64,
    pub customers: u64,
    pub vendors: u64,
    pub bank_accounts: u64,
    pub invoices: u64,
    pub invoice_items: u64,
}

/// Repository trait for Address entity
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Find all addresses in insertion order
    async fn find_all(&self) -> Result<Vec<Address>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Address>, DomainError>;

    async fn create(&self, input: AddressInput) -> Result<Address, DomainError>;

    async fn update(&self, id: i32, input: AddressInput) -> Result<Address, DomainError>;

    /// Fails with `Conflict` while a customer or vendor still uses the address
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Customer entity
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;

    async fn create(&self, input: CustomerInput) -> Result<Customer, DomainError>;

    async fn update(&self, id: i32, input: CustomerInput) -> Result<Customer, DomainError>;

    /// Fails with `Conflict` while invoices reference the customer
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Vendor entity
#[async_trait]
pub trait VendorRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Vendor>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Vendor>, DomainError>;

    async fn create(&self, input: VendorInput) -> Result<Vendor, DomainError>;

    async fn update(&self, id: i32, input: VendorInput) -> Result<Vendor, DomainError>;

    /// Removes the vendor together with its bank accounts.
    /// Fails with `Conflict` while invoices reference the vendor
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for BankAccount entity
#[async_trait]
pub trait BankAccountRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<BankAccount>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<BankAccount>, DomainError>;

    async fn find_by_vendor(&self, vendor_id: i32) -> Result<Vec<BankAccount>, DomainError>;

    async fn create(&self, input: BankAccountInput) -> Result<BankAccount, DomainError>;

    async fn update(&self, id: i32, input: BankAccountInput) -> Result<BankAccount, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Invoice entity
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Invoice>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Invoice>, DomainError>;

    /// Looks up an invoice number within one vendor's invoices
    async fn find_by_number(
        &self,
        vendor_id: i32,
        invoice_number: i32,
    ) -> Result<Option<Invoice>, DomainError>;

    async fn create(&self, input: InvoiceInput) -> Result<Invoice, DomainError>;

    async fn update(&self, id: i32, input: InvoiceInput) -> Result<Invoice, DomainError>;

    /// Removes the invoice and all of its items in one transaction
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Loads the invoice with its parties, payment details and items
    async fn load_document(&self, id: i32) -> Result<InvoiceDocument, DomainError>;
}

/// Repository trait for InvoiceItem entity
#[async_trait]
pub trait InvoiceItemRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<InvoiceItem>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<InvoiceItem>, DomainError>;

    /// Items of one invoice in insertion order
    async fn find_by_invoice(&self, invoice_id: i32) -> Result<Vec<InvoiceItem>, DomainError>;

    async fn create(&self, input: InvoiceItemInput) -> Result<InvoiceItem, DomainError>;

    async fn update(&self, id: i32, input: InvoiceItemInput) -> Result<InvoiceItem, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Aggregate counts across all tables
#[async_trait]
pub trait OverviewRepository: Send + Sync {
    async fn overview(&self) -> Result<Overview, DomainError>;
}
