//! Bank account pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;

use super::choices;
use super::extract::RecordId;
use super::render::{Cell, ConfirmPage, FormPage, ListPage, Row};
use crate::domain::{BankAccount, BankAccountInput, DomainError, FieldErrors};
use crate::forms::{BankAccountForm, INVALID_CHOICE};
use crate::infrastructure::AppState;

const LIST_URL: &str = "/bankaccounts/";

async fn form_page(
    state: &AppState,
    title: String,
    action: String,
    form: &BankAccountForm,
    errors: &FieldErrors,
) -> Result<Response, DomainError> {
    let vendors = choices::vendors(state).await?;
    state.renderer.form(&FormPage {
        title,
        action,
        submit_label: "Save",
        cancel_url: LIST_URL,
        fields: form.fields(errors, vendors),
    })
}

async fn load(state: &AppState, id: i32) -> Result<BankAccount, DomainError> {
    state
        .bank_account_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)
}

async fn clean(
    state: &AppState,
    form: &BankAccountForm,
) -> Result<Result<BankAccountInput, FieldErrors>, DomainError> {
    let input = match form.clean() {
        Ok(input) => input,
        Err(errors) => return Ok(Err(errors)),
    };

    let mut errors = FieldErrors::new();
    if state.vendor_repo.find_by_id(input.vendor_id).await?.is_none() {
        errors.add("vendor", INVALID_CHOICE);
    }
    Ok(errors.into_result().map(|()| input))
}

pub async fn list_bank_accounts(State(state): State<AppState>) -> Result<Response, DomainError> {
    let accounts = state.bank_account_repo.find_all().await?;
    let vendors: HashMap<i32, String> = state
        .vendor_repo
        .find_all()
        .await?
        .into_iter()
        .map(|v| (v.id, v.company_name))
        .collect();

    let rows = accounts
        .iter()
        .map(|a| {
            Row::new(
                "bankaccount",
                a.id,
                vec![
                    Cell::text(vendors.get(&a.vendor_id).cloned().unwrap_or_default()),
                    Cell::text(&a.bank_name),
                    Cell::text(&a.iban),
                    Cell::text(&a.bic),
                ],
            )
        })
        .collect();

    state.renderer.list(&ListPage {
        title: "Bank accounts",
        add_url: Some("/bankaccount/add/"),
        headers: vec!["Vendor", "Bank", "IBAN", "BIC"],
        rows,
        empty_message: "No bank accounts yet.",
    })
}

pub async fn new_bank_account(State(state): State<AppState>) -> Result<Response, DomainError> {
    form_page(
        &state,
        "New bank account".to_string(),
        "/bankaccount/add/".to_string(),
        &BankAccountForm::default(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn create_bank_account(
    State(state): State<AppState>,
    Form(form): Form<BankAccountForm>,
) -> Result<Response, DomainError> {
    match clean(&state, &form).await? {
        Ok(input) => {
            let account = state.bank_account_repo.create(input).await?;
            tracing::info!(
                "Bank account {} created for vendor {}",
                account.id,
                account.vendor_id
            );
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                "New bank account".to_string(),
                "/bankaccount/add/".to_string(),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn edit_bank_account(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let account = load(&state, id).await?;
    form_page(
        &state,
        format!("Edit bank account {}", account.iban),
        format!("/bankaccount/{}/", id),
        &BankAccountForm::from_record(&account),
        &FieldErrors::new(),
    )
    .await
}

pub async fn update_bank_account(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<BankAccountForm>,
) -> Result<Response, DomainError> {
    let account = load(&state, id).await?;
    match clean(&state, &form).await? {
        Ok(input) => {
            state.bank_account_repo.update(id, input).await?;
            tracing::info!("Bank account {} updated", id);
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            form_page(
                &state,
                format!("Edit bank account {}", account.iban),
                format!("/bankaccount/{}/", id),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn confirm_delete_bank_account(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    let account = load(&state, id).await?;
    state.renderer.confirm_delete(&ConfirmPage {
        title: "Delete bank account".to_string(),
        object_label: format!("{} ({})", account.iban, account.bank_name),
        action: format!("/bankaccount/{}/delete/", id),
        cancel_url: LIST_URL,
        warning: None,
    })
}

pub async fn delete_bank_account(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Response, DomainError> {
    state.bank_account_repo.delete(id).await?;
    tracing::info!("Bank account {} deleted", id);
    Ok(Redirect::to(LIST_URL).into_response())
}
