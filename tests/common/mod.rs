#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::Utc;
use invoicer::domain::{
    Address, AddressInput, Customer, CustomerInput, Invoice, InvoiceInput, InvoiceItem,
    InvoiceItemInput, Vendor, VendorInput,
};
use invoicer::{db, server, AppState};
use rust_decimal::Decimal;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app state on a fresh in-memory database
pub async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db).expect("Failed to build state")
}

pub fn app(state: &AppState) -> Router {
    server::build_router(state.clone(), &[])
}

/// Url-encodes a form body the way a browser would
pub fn form_body(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let req = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn post(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    let req = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(fields)))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// Helpers to create records directly through the repositories

pub async fn create_test_address(state: &AppState, street: &str) -> Address {
    state
        .address_repo
        .create(AddressInput {
            street: street.to_string(),
            number: "45".to_string(),
            city: "Capital".to_string(),
            country: "Mainland".to_string(),
        })
        .await
        .expect("Failed to create address")
}

pub async fn create_test_vendor(state: &AppState, address_id: i32) -> Vendor {
    state
        .vendor_repo
        .create(VendorInput {
            name: "John".to_string(),
            company_name: "Doe Company".to_string(),
            address_id,
        })
        .await
        .expect("Failed to create vendor")
}

pub async fn create_test_customer(state: &AppState, address_id: i32) -> Customer {
    state
        .customer_repo
        .create(CustomerInput {
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
            email: "jane@roe.com".to_string(),
            address_id,
        })
        .await
        .expect("Failed to create customer")
}

/// Address, vendor, customer and an invoice numbered `number`
pub async fn create_test_invoice(state: &AppState, number: i32) -> Invoice {
    let address = create_test_address(state, "Main Street").await;
    let vendor = create_test_vendor(state, address.id).await;
    let customer = create_test_customer(state, address.id).await;
    state
        .invoice_repo
        .create(InvoiceInput {
            invoice_number: number,
            date: Utc::now(),
            vendor_id: vendor.id,
            customer_id: customer.id,
        })
        .await
        .expect("Failed to create invoice")
}

pub async fn create_test_item(state: &AppState, invoice_id: i32, price: Decimal) -> InvoiceItem {
    state
        .invoice_item_repo
        .create(InvoiceItemInput {
            invoice_id,
            name: "Security Services".to_string(),
            description: "Implementation of a firewall".to_string(),
            quantity: 1,
            price,
            tax: 0.19,
        })
        .await
        .expect("Failed to create item")
}
