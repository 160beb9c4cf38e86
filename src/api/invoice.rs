//! Invoice pages and PDF export

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;

use super::choices;
use super::extract::RecordId;
use super::render::{Cell, ConfirmPage, FormPage, ListPage, Row};
use crate::domain::{DomainError, FieldErrors, Invoice, InvoiceInput, InvoiceTotals};
use crate::forms::{InvoiceForm, INVALID_CHOICE};
use crate::infrastructure::AppState;
use crate::services::pdf;

const LIST_URL: &str = "/invoices/";
const DUPLICATE_NUMBER: &str = "This vendor already has an invoice with this number.";

async fn form_page(
    state: &AppState,
    title: String,
    action: String,
    form: &InvoiceForm,
    errors: &FieldErrors,
) -> Result<Response, DomainError> {
    let vendors = choices::vendors(state).await?;
    let customers = choices::customers(state).await?;
    state.renderer.form(&FormPage {
        title,
        action,
        submit_label: "Save",
        cancel_url: LIST_URL,
        fields: form.fields(errors, vendors, customers),
    })
}

async fn load(state: &AppState, id: i32) -> Result<Invoice, DomainError> {
    state
        .invoice_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)
}

/// Form rules, both references, and the per-vendor number.
/// `current` is the invoice being edited, which may keep its own number.
async fn clean(
    state: &AppState,
    form: &InvoiceForm,
    current: Option<i32>,
) -> Result<Result<InvoiceInput, FieldErrors>, DomainError> {
    let input = match form.clean() {
        Ok(input) => input,
        Err(errors) => return Ok(Err(errors)),
    };

    let mut errors = FieldErrors::new();
    let vendor = state.vendor_repo.find_by_id(input.vendor_id).await?;
    if vendor.is_none() {
        errors.add("vendor", INVALID_CHOICE);
    }
    if state.customer_repo.find_by_id(input.customer_id).await?.is_none() {
        errors.add("customer", INVALID_CHOICE);
    }

    if vendor.is_some() {
        let clash = state
            .invoice_repo
            .find_by_number(input.vendor_id, input.invoice_number)
            .await?;
        if clash.is_some_and(|other| Some(other.id) != current) {
            errors.add("invoice_number", DUPLICATE_NUMBER);
        }
    }
    Ok(errors.into_result().map(|()| input))
}

pub async fn list_invoices(State(state): State<AppState>) -> Result<Response, DomainError> {
    let invoices = state.invoice_repo.find_all().await?;
    let vendors: HashMap<i32, String> = state
        .vendor_repo
        .find_all()
        .await?
        .into_iter()
        .map(|v| (v.id, v.company_name))
        .collect();
    let customers: HashMap<i32, String> = state
        .customer_repo
        .find_all()
        .await?
        .into_iter()
        .map(|c| (c.id, c.full_name()))
        .collect();

    let mut totals: HashMap<i32, InvoiceTotals> = HashMap::new();
    for item in state.invoice_item_repo.find_all().await? {
        totals
            .entry(item.invoice_id)
            .or_default()
            .add_line(item.price, item.quantity, item.tax);
    }

    let rows = invoices
        .iter()
        .map(|i| {
            let total = totals.get(&i.id).map(|t| t.total).unwrap_or_default();
            Row::new(
                "invoice",
                i.id,
                vec![
                    Cell::number(i.invoice_number),
                    Cell::text(i.date.format("%Y-%m-%d").to_string()),
                    Cell::text(vendors.get(&i.vendor_id).cloned().unwrap_or_default()),
                    Cell::text(customers.get(&i.customer_id).cloned().unwrap_or_default()),
                    Cell::number(total.round_dp(2)),
                ],
            )
            .link(format!("/invoice/{}/pdf/", i.id), "PDF")
        })
        .collect();

    state.renderer.list(&ListPage {
        title: "Invoices",
        add_url: Some("/invoice/add/"),
        headers: vec!["Number", "Date", "Vendor", "Customer", "Total"],
        rows,
        empty_message: "No invoices yet.",
    })
}

pub async fn new_invoice(State(state): State<AppState>) -> Result<Response, DomainError> {
    form_page(
        &state,
        "New invoice".to_string(),
        "/invoice/add/".to_string(),
        &InvoiceForm::default(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<InvoiceForm>,
) -> Result<Response, DomainError> {
    match clean(&state, &form, None).await? {
        Ok(input) => {
            let invoice = state.invoice_repo.create(input).await?;
            tracing::info!(
                "Invoice {} created (number {})",
                invoice.id,
                invoice.invoice_number
            );
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                "New invoice".to_string(),
                "/invoice/add/".to_string(),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn edit_invoice(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let invoice = load(&state, id).await?;
    form_page(
        &state,
        format!("Edit invoice #{}", invoice.invoice_number),
        format!("/invoice/{}/", id),
        &InvoiceForm::from_record(&invoice),
        &FieldErrors::new(),
    )
    .await
}

pub async fn update_invoice(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<InvoiceForm>,
) -> Result<Response, DomainError> {
    let invoice = load(&state, id).await?;
    match clean(&state, &form, Some(id)).await? {
        Ok(mut input) => {
            if form.keeps_day_of(invoice.date) {
                input.date = invoice.date;
            }
            state.invoice_repo.update(id, input).await?;
            tracing::info!("Invoice {} updated", id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                format!("Edit invoice #{}", invoice.invoice_number),
                format!("/invoice/{}/", id),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn confirm_delete_invoice(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let invoice = load(&state, id).await?;
    let items = state.invoice_item_repo.find_by_invoice(id).await?;
    let warning = (!items.is_empty())
        .then(|| format!("Its {} item(s) will be deleted as well.", items.len()));

    state.renderer.confirm_delete(&ConfirmPage {
        title: "Delete invoice".to_string(),
        object_label: format!("Invoice #{}", invoice.invoice_number),
        action: format!("/invoice/{}/delete/", id),
        cancel_url: LIST_URL,
        warning,
    })
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    state.invoice_repo.delete(id).await?;
    tracing::info!("Invoice {} deleted", id);
    Ok(Redirect::to(LIST_URL).into_response())
}

pub async fn invoice_pdf(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let document = state.invoice_repo.load_document(id).await?;
    let bytes = pdf::render_invoice_pdf(&document)?;
    tracing::debug!(
        "Rendered PDF for invoice {} ({} bytes)",
        id,
        bytes.len()
    );

    let disposition = format!(
        "inline; filename=\"invoice-{}.pdf\"",
        document.invoice.invoice_number
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
