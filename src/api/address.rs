//! Address pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::extract::RecordId;
use super::render::{Cell, ConfirmPage, FormPage, ListPage, Row};
use crate::domain::{Address, DomainError, FieldErrors};
use crate::forms::AddressForm;
use crate::infrastructure::AppState;

const LIST_URL: &str = "/addresses/";

fn form_page(
    state: &AppState,
    title: String,
    action: String,
    form: &AddressForm,
    errors: &FieldErrors,
) -> Result<Response, DomainError> {
    state.renderer.form(&FormPage {
        title,
        action,
        submit_label: "Save",
        cancel_url: LIST_URL,
        fields: form.fields(errors),
    })
}

async fn load(state: &AppState, id: i32) -> Result<Address, DomainError> {
    state
        .address_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)
}

pub async fn list_addresses(State(state): State<AppState>) -> Result<Response, DomainError> {
    let addresses = state.address_repo.find_all().await?;

    let rows = addresses
        .iter()
        .map(|a| {
            Row::new(
                "address",
                a.id,
                vec![
                    Cell::text(&a.street),
                    Cell::text(&a.number),
                    Cell::text(&a.city),
                    Cell::text(&a.country),
                ],
            )
        })
        .collect();

    state.renderer.list(&ListPage {
        title: "Addresses",
        add_url: Some("/address/add/"),
        headers: vec!["Street", "Number", "City", "Country"],
        rows,
        empty_message: "No addresses yet.",
    })
}

pub async fn new_address(State(state): State<AppState>) -> Result<Response, DomainError> {
    form_page(
        &state,
        "New address".to_string(),
        "/address/add/".to_string(),
        &AddressForm::default(),
        &FieldErrors::new(),
    )
}

pub async fn create_address(
    State(state): State<AppState>,
    Form(form): Form<AddressForm>,
) -> Result<Response, DomainError> {
    match form.clean() {
        Ok(input) => {
            let address = state.address_repo.create(input).await?;
            tracing::info!("Address {} created", address.id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => form_page(
            &state,
            "New address".to_string(),
            "/address/add/".to_string(),
            &form,
            &errors,
        ),
    }
}

pub async fn edit_address(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let address = load(&state, id).await?;
    form_page(
        &state,
        format!("Edit address {}", address.label()),
        format!("/address/{}/", id),
        &AddressForm::from_record(&address),
        &FieldErrors::new(),
    )
}

pub async fn update_address(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<AddressForm>,
) -> Result<Response, DomainError> {
    let address = load(&state, id).await?;
    match form.clean() {
        Ok(input) => {
            state.address_repo.update(id, input).await?;
            tracing::info!("Address {} updated", id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => form_page(
            &state,
            format!("Edit address {}", address.label()),
            format!("/address/{}/", id),
            &form,
            &errors,
        ),
    }
}

pub async fn confirm_delete_address(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let address = load(&state, id).await?;
    state.renderer.confirm_delete(&ConfirmPage {
        title: "Delete address".to_string(),
        object_label: address.label(),
        action: format!("/address/{}/delete/", id),
        cancel_url: LIST_URL,
        warning: None,
    })
}

pub async fn delete_address(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    state.address_repo.delete(id).await?;
    tracing::info!("Address {} deleted", id);
    Ok(Redirect::to(LIST_URL).into_response())
}
