mod common;

use axum::http::{header, StatusCode};
use common::*;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_create_address_redirects_to_list() {
    let state = setup_test_state().await;
    let app = app(&state);

    let response = post(
        &app,
        "/address/add/",
        &[
            ("street", "Main Street"),
            ("number", "45"),
            ("city", "Capital"),
            ("country", "Mainland"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/addresses/");

    let addresses = state.address_repo.find_all().await.unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].street, "Main Street");
    assert_eq!(addresses[0].number, "45");

    let list = body_text(get(&app, "/addresses/").await).await;
    assert!(list.contains("Main Street"));
}

#[tokio::test]
async fn test_missing_fields_rerender_form() {
    let state = setup_test_state().await;
    let app = app(&state);

    let response = post(&app, "/address/add/", &[("street", "  "), ("number", "45")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("This field is required."));
    assert!(state.address_repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_customer_keeps_address_identity() {
    let state = setup_test_state().await;
    let app = app(&state);
    let address = create_test_address(&state, "Harbour Road").await;
    let address_id = address.id.to_string();

    let response = post(
        &app,
        "/customer/add/",
        &[
            ("first_name", "Jane"),
            ("last_name", "Roe"),
            ("email", "jane@roe.com"),
            ("address", address_id.as_str()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/customers/");

    let customers = state.customer_repo.find_all().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].address_id, address.id);
    let stored = state
        .address_repo
        .find_by_id(customers[0].address_id)
        .await
        .unwrap();
    assert_eq!(stored, Some(address));
}

#[tokio::test]
async fn test_unknown_foreign_key_is_a_field_error() {
    let state = setup_test_state().await;
    let app = app(&state);

    let response = post(
        &app,
        "/vendor/add/",
        &[
            ("name", "John"),
            ("company_name", "Doe Company"),
            ("address", "999"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Select a valid choice."));
    assert!(state.vendor_repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_vendor() {
    let state = setup_test_state().await;
    let app = app(&state);
    let address = create_test_address(&state, "Main Street").await;

    let response = post(
        &app,
        "/vendor/add/",
        &[
            ("name", "John"),
            ("company_name", "Doe Company"),
            ("address", address.id.to_string().as_str()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let vendors = state.vendor_repo.find_all().await.unwrap();
    assert_eq!(vendors.len(), 1);
    assert_eq!(vendors[0].company_name, "Doe Company");
}

#[tokio::test]
async fn test_invoice_item_redirects_to_invoices() {
    let state = setup_test_state().await;
    let app = app(&state);
    let invoice = create_test_invoice(&state, 1).await;

    let response = post(
        &app,
        "/invoice-item/add/",
        &[
            ("invoice", invoice.id.to_string().as_str()),
            ("name", "Security Services"),
            ("description", "Implementation of a firewall"),
            ("quantity", "1"),
            ("price", "100.0"),
            ("tax", "0.19"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/invoices/");

    let items = state.invoice_item_repo.find_by_invoice(invoice.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].price, dec!(100.00));
    assert_eq!(items[0].total(), dec!(119));
}

#[tokio::test]
async fn test_negative_quantity_is_rejected() {
    let state = setup_test_state().await;
    let app = app(&state);
    let invoice = create_test_invoice(&state, 1).await;

    let response = post(
        &app,
        "/invoice-item/add/",
        &[
            ("invoice", invoice.id.to_string().as_str()),
            ("name", "Security Services"),
            ("quantity", "-1"),
            ("price", "100.0"),
            ("tax", "0.19"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Ensure this value is greater than or equal to 0."));
    assert!(state.invoice_item_repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_finite_price_is_rejected() {
    let state = setup_test_state().await;
    let app = app(&state);
    let invoice = create_test_invoice(&state, 1).await;

    for price in ["inf", "NaN"] {
        let response = post(
            &app,
            "/invoice-item/add/",
            &[
                ("invoice", invoice.id.to_string().as_str()),
                ("name", "Security Services"),
                ("quantity", "1"),
                ("price", price),
                ("tax", "0.19"),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("Price must be a finite number."));
    }
    assert!(state.invoice_item_repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let state = setup_test_state().await;
    let app = app(&state);

    for uri in [
        "/address/999/",
        "/customer/999/",
        "/vendor/999/",
        "/bankaccount/999/",
        "/invoice/999/",
        "/invoice-item/999/",
        "/invoice/999/delete/",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
    }

    let response = post(
        &app,
        "/address/999/",
        &[
            ("street", "Main Street"),
            ("number", "45"),
            ("city", "Capital"),
            ("country", "Mainland"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post(&app, "/address/999/delete/", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_invoice_item() {
    let state = setup_test_state().await;
    let app = app(&state);
    let invoice = create_test_invoice(&state, 1).await;
    let item = create_test_item(&state, invoice.id, dec!(100.00)).await;

    let response = post(
        &app,
        &format!("/invoice-item/{}/", item.id),
        &[
            ("invoice", invoice.id.to_string().as_str()),
            ("name", "Support"),
            ("quantity", "8"),
            ("price", "85.50"),
            ("tax", "0.19"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let stored = state
        .invoice_item_repo
        .find_by_id(item.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Support");
    assert_eq!(stored.net_total(), dec!(684.00));
}

#[tokio::test]
async fn test_deleting_invoice_removes_items() {
    let state = setup_test_state().await;
    let app = app(&state);
    let invoice = create_test_invoice(&state, 1).await;
    create_test_item(&state, invoice.id, dec!(100.00)).await;
    create_test_item(&state, invoice.id, dec!(5.25)).await;

    let confirm = get(&app, &format!("/invoice/{}/delete/", invoice.id)).await;
    assert_eq!(confirm.status(), StatusCode::OK);
    assert!(body_text(confirm).await.contains("2 item(s)"));

    let response = post(&app, &format!("/invoice/{}/delete/", invoice.id), &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(state.invoice_repo.find_by_id(invoice.id).await.unwrap().is_none());
    assert!(state.invoice_item_repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_referenced_address_cannot_be_deleted() {
    let state = setup_test_state().await;
    let app = app(&state);
    let address = create_test_address(&state, "Main Street").await;
    create_test_customer(&state, address.id).await;

    let response = post(&app, &format!("/address/{}/delete/", address.id), &[]).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(state.address_repo.find_by_id(address.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_duplicate_invoice_number_per_vendor() {
    let state = setup_test_state().await;
    let app = app(&state);
    let invoice = create_test_invoice(&state, 7).await;
    let vendor_id = invoice.vendor_id.to_string();
    let customer_id = invoice.customer_id.to_string();

    let response = post(
        &app,
        "/invoice/add/",
        &[
            ("invoice_number", "7"),
            ("date", "2024-03-01"),
            ("vendor", vendor_id.as_str()),
            ("customer", customer_id.as_str()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("This vendor already has an invoice with this number."));

    // Saving an invoice under its own number is fine
    let response = post(
        &app,
        &format!("/invoice/{}/", invoice.id),
        &[
            ("invoice_number", "7"),
            ("date", ""),
            ("vendor", vendor_id.as_str()),
            ("customer", customer_id.as_str()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Another vendor may reuse the number
    let address = create_test_address(&state, "Harbour Road").await;
    let other = create_test_vendor(&state, address.id).await;
    let response = post(
        &app,
        "/invoice/add/",
        &[
            ("invoice_number", "7"),
            ("vendor", other.id.to_string().as_str()),
            ("customer", customer_id.as_str()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.invoice_repo.find_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_invoice_pdf() {
    let state = setup_test_state().await;
    let app = app(&state);
    let invoice = create_test_invoice(&state, 42).await;
    create_test_item(&state, invoice.id, dec!(100.00)).await;

    let response = get(&app, &format!("/invoice/{}/pdf/", invoice.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "inline; filename=\"invoice-42.pdf\""
    );
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF"));

    let response = get(&app, "/invoice/999/pdf/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bank_account_with_bad_iban() {
    let state = setup_test_state().await;
    let app = app(&state);
    let address = create_test_address(&state, "Main Street").await;
    let vendor = create_test_vendor(&state, address.id).await;

    let response = post(
        &app,
        "/bankaccount/add/",
        &[
            ("vendor", vendor.id.to_string().as_str()),
            ("bank_name", "Commerzbank"),
            ("iban", "DE00 3704 0044 0532 0130 00"),
            ("bic", "COBADEFF"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.bank_account_repo.find_all().await.unwrap().is_empty());

    let response = post(
        &app,
        "/bankaccount/add/",
        &[
            ("vendor", vendor.id.to_string().as_str()),
            ("bank_name", "Commerzbank"),
            ("iban", "DE89 3704 0044 0532 0130 00"),
            ("bic", "COBADEFF"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/bankaccounts/");
}

#[tokio::test]
async fn test_start_page_and_health() {
    let state = setup_test_state().await;
    let app = app(&state);
    create_test_invoice(&state, 1).await;

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/invoice/add/"));

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "invoicer");
}

/// Value attribute of the named input on a rendered form
fn input_value(html: &str, name: &str) -> String {
    let marker = format!("name=\"{}\" value=\"", name);
    let start = html.find(&marker).map(|i| i + marker.len()).unwrap();
    let end = html[start..].find('"').unwrap();
    html[start..start + end].to_string()
}

#[tokio::test]
async fn test_resaving_invoice_keeps_its_timestamp() {
    let state = setup_test_state().await;
    let app = app(&state);
    let invoice = create_test_invoice(&state, 5).await;
    let before = state
        .invoice_repo
        .find_by_id(invoice.id)
        .await
        .unwrap()
        .unwrap()
        .date;

    let page = body_text(get(&app, &format!("/invoice/{}/", invoice.id)).await).await;
    let date = input_value(&page, "date");
    let number = input_value(&page, "invoice_number");

    let response = post(
        &app,
        &format!("/invoice/{}/", invoice.id),
        &[
            ("invoice_number", number.as_str()),
            ("date", date.as_str()),
            ("vendor", invoice.vendor_id.to_string().as_str()),
            ("customer", invoice.customer_id.to_string().as_str()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let stored = state
        .invoice_repo
        .find_by_id(invoice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.date, before);

    // Picking another day still takes effect
    let response = post(
        &app,
        &format!("/invoice/{}/", invoice.id),
        &[
            ("invoice_number", number.as_str()),
            ("date", "2000-01-02"),
            ("vendor", invoice.vendor_id.to_string().as_str()),
            ("customer", invoice.customer_id.to_string().as_str()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let stored = state
        .invoice_repo
        .find_by_id(invoice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.date.format("%Y-%m-%d").to_string(), "2000-01-02");
}

#[tokio::test]
async fn test_out_of_range_ids_are_not_found() {
    let state = setup_test_state().await;
    let app = app(&state);

    for uri in [
        "/address/99999999999/",
        "/invoice/99999999999/pdf/",
        "/customer/abc/",
        "/vendor/-1/delete/",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
    }

    let response = post(&app, "/invoice-item/99999999999/delete/", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
