use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::domain::DomainError;

/// Primary key from the `:id` path segment.
///
/// Anything that is not an `i32` cannot name a stored row, so it is a 404
/// rather than a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| DomainError::NotFound)?;
        raw.parse().map(RecordId).map_err(|_| DomainError::NotFound)
    }
}
