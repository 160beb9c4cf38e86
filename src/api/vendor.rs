//! Vendor pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;

use super::choices;
use super::extract::RecordId;
use super::render::{Cell, ConfirmPage, FormPage, ListPage, Row};
use crate::domain::{DomainError, FieldErrors, Vendor, VendorInput};
use crate::forms::{VendorForm, INVALID_CHOICE};
use crate::infrastructure::AppState;

const LIST_URL: &str = "/vendors/";

async fn form_page(
    state: &AppState,
    title: String,
    action: String,
    form: &VendorForm,
    errors: &FieldErrors,
) -> Result<Response, DomainError> {
    let addresses = choices::addresses(state).await?;
    state.renderer.form(&FormPage {
        title,
        action,
        submit_label: "Save",
        cancel_url: LIST_URL,
        fields: form.fields(errors, addresses),
    })
}

async fn load(state: &AppState, id: i32) -> Result<Vendor, DomainError> {
    state
        .vendor_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)
}

async fn clean(
    state: &AppState,
    form: &VendorForm,
) -> Result<Result<VendorInput, FieldErrors>, DomainError> {
    let input = match form.clean() {
        Ok(input) => input,
        Err(errors) => return Ok(Err(errors)),
    };

    let mut errors = FieldErrors::new();
    if state.address_repo.find_by_id(input.address_id).await?.is_none() {
        errors.add("address", INVALID_CHOICE);
    }
    Ok(errors.into_result().map(|()| input))
}

pub async fn list_vendors(State(state): State<AppState>) -> Result<Response, DomainError> {
    let vendors = state.vendor_repo.find_all().await?;
    let addresses: HashMap<i32, String> = state
        .address_repo
        .find_all()
        .await?
        .into_iter()
        .map(|a| (a.id, a.label()))
        .collect();

    let rows = vendors
        .iter()
        .map(|v| {
            Row::new(
                "vendor",
                v.id,
                vec![
                    Cell::text(&v.name),
                    Cell::text(&v.company_name),
                    Cell::text(addresses.get(&v.address_id).cloned().unwrap_or_default()),
                ],
            )
        })
        .collect();

    state.renderer.list(&ListPage {
        title: "Vendors",
        add_url: Some("/vendor/add/"),
        headers: vec!["Name", "Company", "Address"],
        rows,
        empty_message: "No vendors yet.",
    })
}

pub async fn new_vendor(State(state): State<AppState>) -> Result<Response, DomainError> {
    form_page(
        &state,
        "New vendor".to_string(),
        "/vendor/add/".to_string(),
        &VendorForm::default(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_vendor(
    State(state): State<AppState>,
    Form(form): Form<VendorForm>,
) -> Result<Response, DomainError> {
    match clean(&state, &form).await? {
        Ok(input) => {
            let vendor = state.vendor_repo.create(input).await?;
            tracing::info!("Vendor {} created", vendor.id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                "New vendor".to_string(),
                "/vendor/add/".to_string(),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn edit_vendor(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let vendor = load(&state, id).await?;
    form_page(
        &state,
        format!("Edit vendor {}", vendor.name),
        format!("/vendor/{}/", id),
        &VendorForm::from_record(&vendor),
        &FieldErrors::new(),
    )
    .await
}

pub async fn update_vendor(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<VendorForm>,
) -> Result<Response, DomainError> {
    let vendor = load(&state, id).await?;
    match clean(&state, &form).await? {
        Ok(input) => {
            state.vendor_repo.update(id, input).await?;
            tracing::info!("Vendor {} updated", id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                format!("Edit vendor {}", vendor.name),
                format!("/vendor/{}/", id),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn confirm_delete_vendor(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let vendor = load(&state, id).await?;
    let accounts = state.bank_account_repo.find_by_vendor(id).await?;
    let warning = (!accounts.is_empty())
        .then(|| format!("Its {} bank account(s) will be deleted as well.", accounts.len()));

    state.renderer.confirm_delete(&ConfirmPage {
        title: "Delete vendor".to_string(),
        object_label: format!("{} ({})", vendor.name, vendor.company_name),
        action: format!("/vendor/{}/delete/", id),
        cancel_url: LIST_URL,
        warning,
    })
}

pub async fn delete_vendor(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    state.vendor_repo.delete(id).await?;
    tracing::info!("Vendor {} deleted", id);
    Ok(Redirect::to(LIST_URL).into_response())
}
