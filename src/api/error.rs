//! Maps domain failures onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::render::Renderer;
use crate::domain::DomainError;

impl DomainError {
    pub fn status(&self) -> StatusCode {
        match self {
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Database(_) | DomainError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            DomainError::NotFound => "The requested record does not exist.".to_string(),
            DomainError::Validation(errors) => errors.to_string(),
            DomainError::Conflict(reason) => reason.clone(),
            DomainError::Database(_) | DomainError::Render(_) => {
                tracing::error!("Request failed: {}", self);
                "Something went wrong while handling the request.".to_string()
            }
        };

        match Renderer::global().and_then(|r| r.error(status, &message)) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, message).into_response()
            }
        }
    }
}
