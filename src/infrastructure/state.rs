//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::api::render::Renderer;
use crate::domain::{
    AddressRepository, BankAccountRepository, CustomerRepository, DomainError,
    InvoiceItemRepository, InvoiceRepository, OverviewRepository, VendorRepository,
};
use crate::infrastructure::{
    SeaOrmAddressRepository, SeaOrmBankAccountRepository, SeaOrmCustomerRepository,
    SeaOrmInvoiceItemRepository, SeaOrmInvoiceRepository, SeaOrmOverviewRepository,
    SeaOrmVendorRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub address_repo: Arc<dyn AddressRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub vendor_repo: Arc<dyn VendorRepository>,
    pub bank_account_repo: Arc<dyn BankAccountRepository>,
    pub invoice_repo: Arc<dyn InvoiceRepository>,
    pub invoice_item_repo: Arc<dyn InvoiceItemRepository>,
    pub overview_repo: Arc<dyn OverviewRepository>,
    /// HTML templates, parsed once per process
    pub renderer: &'static Renderer,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Result<Self, DomainError> {
        Ok(Self {
            address_repo: Arc::new(SeaOrmAddressRepository::new(db.clone())),
            customer_repo: Arc::new(SeaOrmCustomerRepository::new(db.clone())),
            vendor_repo: Arc::new(SeaOrmVendorRepository::new(db.clone())),
            bank_account_repo: Arc::new(SeaOrmBankAccountRepository::new(db.clone())),
            invoice_repo: Arc::new(SeaOrmInvoiceRepository::new(db.clone())),
            invoice_item_repo: Arc::new(SeaOrmInvoiceItemRepository::new(db.clone())),
            overview_repo: Arc::new(SeaOrmOverviewRepository::new(db.clone())),
            renderer: Renderer::global()?,
            db,
        })
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
