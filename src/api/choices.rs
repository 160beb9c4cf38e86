//! Select-box options for foreign-key fields

use crate::domain::DomainError;
use crate::forms::Choice;
use crate::infrastructure::AppState;

pub async fn addresses(state: &AppState) -> Result<Vec<Choice>, DomainError> {
    Ok(state
        .address_repo
        .find_all()
        .await?
        .iter()
        .map(|a| Choice::new(a.id, a.label()))
        .collect())
}

pub async fn customers(state: &AppState) -> Result<Vec<Choice>, DomainError> {
    Ok(state
        .customer_repo
        .find_all()
        .await?
        .iter()
        .map(|c| Choice::new(c.id, c.full_name()))
        .collect())
}

pub async fn vendors(state: &AppState) -> Result<Vec<Choice>, DomainError> {
    Ok(state
        .vendor_repo
        .find_all()
        .await?
        .iter()
        .map(|v| Choice::new(v.id, format!("{} ({})", v.name, v.company_name)))
        .collect())
}

pub async fn invoices(state: &AppState) -> Result<Vec<Choice>, DomainError> {
    Ok(state
        .invoice_repo
        .find_all()
        .await?
        .iter()
        .map(|i| Choice::new(i.id, format!("Invoice #{}", i.invoice_number)))
        .collect())
}
