use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{
    AddressInput, BankAccountInput, CustomerInput, DomainError, InvoiceInput, InvoiceItemInput,
    VendorInput,
};
use crate::infrastructure::AppState;

/// Inserts one of everything when the database is empty. Safe to call on every start.
pub async fn seed_demo_data(state: &AppState) -> Result<bool, DomainError> {
    if !state.invoice_repo.find_all().await?.is_empty() {
        return Ok(false);
    }

    let vendor_address = state
        .address_repo
        .create(AddressInput {
            street: "Main Street".to_owned(),
            number: "45".to_owned(),
            city: "Capital".to_owned(),
            country: "Mainland".to_owned(),
        })
        .await?;
    let customer_address = state
        .address_repo
        .create(AddressInput {
            street: "Harbour Road".to_owned(),
            number: "7".to_owned(),
            city: "Port Town".to_owned(),
            country: "Mainland".to_owned(),
        })
        .await?;

    let vendor = state
        .vendor_repo
        .create(VendorInput {
            name: "John".to_owned(),
            company_name: "Doe Company".to_owned(),
            address_id: vendor_address.id,
        })
        .await?;
    state
        .bank_account_repo
        .create(BankAccountInput {
            vendor_id: vendor.id,
            bank_name: "Commerzbank".to_owned(),
            iban: "DE89370400440532013000".to_owned(),
            bic: "COBADEFFXXX".to_owned(),
        })
        .await?;

    let customer = state
        .customer_repo
        .create(CustomerInput {
            first_name: "Jane".to_owned(),
            last_name: "Roe".to_owned(),
            email: "jane@roe.com".to_owned(),
            address_id: customer_address.id,
        })
        .await?;

    let invoice = state
        .invoice_repo
        .create(InvoiceInput {
            invoice_number: 1,
            date: Utc::now(),
            vendor_id: vendor.id,
            customer_id: customer.id,
        })
        .await?;

    let items = [
        ("Security Services", "Implementation of a firewall", 1, Decimal::new(100_000, 2), 0.19),
        ("Support", "Hourly support contract", 8, Decimal::new(8_550, 2), 0.19),
    ];
    for (name, description, quantity, price, tax) in items {
        state
            .invoice_item_repo
            .create(InvoiceItemInput {
                invoice_id: invoice.id,
                name: name.to_owned(),
                description: description.to_owned(),
                quantity,
                price,
                tax,
            })
            .await?;
    }

    Ok(true)
}
