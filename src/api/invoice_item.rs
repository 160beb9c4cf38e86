//! Invoice item pages
//!
//! Items are managed from the invoice list, so successful posts go back there.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;

use super::choices;
use super::extract::RecordId;
use super::render::{Cell, ConfirmPage, FormPage, ListPage, Row};
use crate::domain::{DomainError, FieldErrors, InvoiceItem, InvoiceItemInput};
use crate::forms::{InvoiceItemForm, INVALID_CHOICE};
use crate::infrastructure::AppState;

const INVOICES_URL: &str = "/invoices/";

async fn form_page(
    state: &AppState,
    title: String,
    action: String,
    form: &InvoiceItemForm,
    errors: &FieldErrors,
) -> Result<Response, DomainError> {
    let invoices = choices::invoices(state).await?;
    state.renderer.form(&FormPage {
        title,
        action,
        submit_label: "Save",
        cancel_url: INVOICES_URL,
        fields: form.fields(errors, invoices),
    })
}

async fn load(state: &AppState, id: i32) -> Result<InvoiceItem, DomainError> {
    state
        .invoice_item_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)
}

async fn clean(
    state: &AppState,
    form: &InvoiceItemForm,
) -> Result<Result<InvoiceItemInput, FieldErrors>, DomainError> {
    let input = match form.clean() {
        Ok(input) => input,
        Err(errors) => return Ok(Err(errors)),
    };

    let mut errors = FieldErrors::new();
    if state.invoice_repo.find_by_id(input.invoice_id).await?.is_none() {
        errors.add("invoice", INVALID_CHOICE);
    }
    Ok(errors.into_result().map(|()| input))
}

pub async fn list_invoice_items(State(state): State<AppState>) -> Result<Response, DomainError> {
    let items = state.invoice_item_repo.find_all().await?;
    let numbers: HashMap<i32, i32> = state
        .invoice_repo
        .find_all()
        .await?
        .into_iter()
        .map(|i| (i.id, i.invoice_number))
        .collect();

    let rows = items
        .iter()
        .map(|item| {
            let invoice = numbers
                .get(&item.invoice_id)
                .map(|n| format!("#{}", n))
                .unwrap_or_default();
            Row::new(
                "invoice-item",
                item.id,
                vec![
                    Cell::text(invoice),
                    Cell::text(&item.name),
                    Cell::number(item.quantity),
                    Cell::number(item.price),
                    Cell::number(item.tax),
                    Cell::number(item.net_total().round_dp(2)),
                    Cell::number(item.total().round_dp(2)),
                ],
            )
        })
        .collect();

    state.renderer.list(&ListPage {
        title: "Invoice items",
        add_url: Some("/invoice-item/add/"),
        headers: vec!["Invoice", "Name", "Quantity", "Price", "Tax", "Net", "Total"],
        rows,
        empty_message: "No invoice items yet.",
    })
}

pub async fn new_invoice_item(State(state): State<AppState>) -> Result<Response, DomainError> {
    form_page(
        &state,
        "New invoice item".to_string(),
        "/invoice-item/add/".to_string(),
        &InvoiceItemForm::default(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_invoice_item(
    State(state): State<AppState>,
    Form(form): Form<InvoiceItemForm>,
) -> Result<Response, DomainError> {
    match clean(&state, &form).await? {
        Ok(input) => {
            let item = state.invoice_item_repo.create(input).await?;
            tracing::info!("Item {} added to invoice {}", item.id, item.invoice_id);
            Ok(Redirect::to(INVOICES_URL).into_response())
        }
        Err(errors) => {
            tracing::debug!("Rejected invoice item: {}", errors);
            form_page(
                &state,
                "New invoice item".to_string(),
                "/invoice-item/add/".to_string(),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn edit_invoice_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let item = load(&state, id).await?;
    form_page(
        &state,
        format!("Edit item {}", item.name),
        format!("/invoice-item/{}/", id),
        &InvoiceItemForm::from_record(&item),
        &FieldErrors::new(),
    )
    .await
}

pub async fn update_invoice_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<InvoiceItemForm>,
) -> Result<Response, DomainError> {
    let item = load(&state, id).await?;
    match clean(&state, &form).await? {
        Ok(input) => {
            state.invoice_item_repo.update(id, input).await?;
            tracing::info!("Invoice item {} updated", id);
            Ok(Redirect::to(INVOICES_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                format!("Edit item {}", item.name),
                format!("/invoice-item/{}/", id),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn confirm_delete_invoice_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let item = load(&state, id).await?;
    state.renderer.confirm_delete(&ConfirmPage {
        title: "Delete invoice item".to_string(),
        object_label: item.name,
        action: format!("/invoice-item/{}/delete/", id),
        cancel_url: INVOICES_URL,
        warning: None,
    })
}

pub async fn delete_invoice_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    state.invoice_item_repo.delete(id).await?;
    tracing::info!("Invoice item {} deleted", id);
    Ok(Redirect::to(INVOICES_URL).into_response())
}
