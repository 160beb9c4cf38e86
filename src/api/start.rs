use axum::{extract::State, response::Response};

use crate::domain::DomainError;
use crate::infrastructure::AppState;

/// Start page: record counts and links into every list
pub async fn start(State(state): State<AppState>) -> Result<Response, DomainError> {
    let overview = state.overview_repo.overview().await?;
    state.renderer.start(&overview)
}
