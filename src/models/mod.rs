pub mod address;
pub mod bank_account;
pub mod customer;
pub mod invoice;
pub mod invoice_item;
pub mod vendor;
