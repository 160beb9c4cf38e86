//! Customer pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;

use super::choices;
use super::extract::RecordId;
use super::render::{Cell, ConfirmPage, FormPage, ListPage, Row};
use crate::domain::{Customer, CustomerInput, DomainError, FieldErrors};
use crate::forms::{CustomerForm, INVALID_CHOICE};
use crate::infrastructure::AppState;

const LIST_URL: &str = "/customers/";

async fn form_page(
    state: &AppState,
    title: String,
    action: String,
    form: &CustomerForm,
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

async fn load(state: &AppState, id: i32) -> Result<Customer, DomainError> {
    state
        .customer_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)
}

/// Form rules plus the address reference
async fn clean(
    state: &AppState,
    form: &CustomerForm,
) -> Result<Result<CustomerInput, FieldErrors>, DomainError> {
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

pub async fn list_customers(State(state): State<AppState>) -> Result<Response, DomainError> {
    let customers = state.customer_repo.find_all().await?;
    let addresses: HashMap<i32, String> = state
        .address_repo
        .find_all()
        .await?
        .into_iter()
        .map(|a| (a.id, a.label()))
        .collect();

    let rows = customers
        .iter()
        .map(|c| {
            Row::new(
                "customer",
                c.id,
                vec![
                    Cell::text(&c.first_name),
                    Cell::text(&c.last_name),
                    Cell::text(&c.email),
                    Cell::text(addresses.get(&c.address_id).cloned().unwrap_or_default()),
                ],
            )
        })
        .collect();

    state.renderer.list(&ListPage {
        title: "Customers",
        add_url: Some("/customer/add/"),
        headers: vec!["First name", "Last name", "E-mail", "Address"],
        rows,
        empty_message: "No customers yet.",
    })
}

pub async fn new_customer(State(state): State<AppState>) -> Result<Response, DomainError> {
    form_page(
        &state,
        "New customer".to_string(),
        "/customer/add/".to_string(),
        &CustomerForm::default(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_customer(
    State(state): State<AppState>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, DomainError> {
    match clean(&state, &form).await? {
        Ok(input) => {
            let customer = state.customer_repo.create(input).await?;
            tracing::info!("Customer {} created", customer.id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                "New customer".to_string(),
                "/customer/add/".to_string(),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn edit_customer(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let customer = load(&state, id).await?;
    form_page(
        &state,
        format!("Edit customer {}", customer.full_name()),
        format!("/customer/{}/", id),
        &CustomerForm::from_record(&customer),
        &FieldErrors::new(),
    )
    .await
}

pub async fn update_customer(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<CustomerForm>,
) -> Result<Response, DomainError> {
    let customer = load(&state, id).await?;
    match clean(&state, &form).await? {
        Ok(input) => {
            state.customer_repo.update(id, input).await?;
            tracing::info!("Customer {} updated", id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                format!("Edit customer {}", customer.full_name()),
                format!("/customer/{}/", id),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn confirm_delete_customer(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let customer = load(&state, id).await?;
    state.renderer.confirm_delete(&ConfirmPage {
        title: "Delete customer".to_string(),
        object_label: customer.full_name(),
        action: format!("/customer/{}/delete/", id),
        cancel_url: LIST_URL,
        warning: None,
    })
}

pub async fn delete_customer(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    state.customer_repo.delete(id).await?;
    tracing::info!("Customer {} deleted", id);
    Ok(Redirect::to(LIST_URL).into_response())
}
