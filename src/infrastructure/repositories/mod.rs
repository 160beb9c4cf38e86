//! Repository implementations using SeaORM

pub mod address_repository;
pub mod bank_account_repository;
pub mod customer_repository;
pub mod invoice_item_repository;
pub mod invoice_repository;
pub mod overview_repository;
pub mod vendor_repository;

pub use address_repository::SeaOrmAddressRepository;
pub use bank_account_repository::SeaOrmBankAccountRepository;
pub use customer_repository::SeaOrmCustomerRepository;
pub use invoice_item_repository::SeaOrmInvoiceItemRepository;
pub use invoice_repository::SeaOrmInvoiceRepository;
pub use overview_repository::SeaOrmOverviewRepository;
pub use vendor_repository::SeaOrmVendorRepository;
