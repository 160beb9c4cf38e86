pub mod address;
pub mod bank_account;
pub mod choices;
pub mod customer;
pub mod error;
pub mod extract;
pub mod health;
pub mod invoice;
pub mod invoice_item;
pub mod render;
pub mod start;
pub mod vendor;

use axum::{routing::get, Router};

use crate::infrastructure::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(start::start))
        // Health check
        .route("/health", get(health::health_check))
        // Addresses
        .route("/addresses/", get(address::list_addresses))
        .route(
            "/address/add/",
            get(address::new_address).post(address::create_address),
        )
        .route(
            "/address/:id/",
            get(address::edit_address).post(address::update_address),
        )
        .route(
            "/address/:id/delete/",
            get(address::confirm_delete_address).post(address::delete_address),
        )
        // Customers
        .route("/customers/", get(customer::list_customers))
        .route(
            "/customer/add/",
            get(customer::new_customer).post(customer::create_customer),
        )
        .route(
            "/customer/:id/",
            get(customer::edit_customer).post(customer::update_customer),
        )
        .route(
            "/customer/:id/delete/",
            get(customer::confirm_delete_customer).post(customer::delete_customer),
        )
        // Vendors
        .route("/vendors/", get(vendor::list_vendors))
        .route(
            "/vendor/add/",
            get(vendor::new_vendor).post(vendor::create_vendor),
        )
        .route(
            "/vendor/:id/",
            get(vendor::edit_vendor).post(vendor::update_vendor),
        )
        .route(
            "/vendor/:id/delete/",
            get(vendor::confirm_delete_vendor).post(vendor::delete_vendor),
        )
        // Bank accounts
        .route("/bankaccounts/", get(bank_account::list_bank_accounts))
        .route(
            "/bankaccount/add/",
            get(bank_account::new_bank_account).post(bank_account::create_bank_account),
        )
        .route(
            "/bankaccount/:id/",
            get(bank_account::edit_bank_account).post(bank_account::update_bank_account),
        )
        .route(
            "/bankaccount/:id/delete/",
            get(bank_account::confirm_delete_bank_account)
                .post(bank_account::delete_bank_account),
        )
        // Invoices
        .route("/invoices/", get(invoice::list_invoices))
        .route(
            "/invoice/add/",
            get(invoice::new_invoice).post(invoice::create_invoice),
        )
        .route(
            "/invoice/:id/",
            get(invoice::edit_invoice).post(invoice::update_invoice),
        )
        .route(
            "/invoice/:id/delete/",
            get(invoice::confirm_delete_invoice).post(invoice::delete_invoice),
        )
        .route("/invoice/:id/pdf/", get(invoice::invoice_pdf))
        // Invoice items
        .route("/invoice-items/", get(invoice_item::list_invoice_items))
        .route(
            "/invoice-item/add/",
            get(invoice_item::new_invoice_item).post(invoice_item::create_invoice_item),
        )
        .route(
            "/invoice-item/:id/",
            get(invoice_item::edit_invoice_item).post(invoice_item::update_invoice_item),
        )
        .route(
            "/invoice-item/:id/delete/",
            get(invoice_item::confirm_delete_invoice_item)
                .post(invoice_item::delete_invoice_item),
        )
        .with_state(state)
}
