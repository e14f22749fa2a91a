//! Numeric `:id` path segment extractor.

use crate::error::AppError;
use crate::handlers::params::parse_id;
use async_trait::async_trait;
use axum::{
    extract::{rejection::PathRejection, FromRequestParts, Path},
    http::request::Parts,
};

/// The `:id` segment as an `i32`. Undecodable or non-numeric segments become a 400
/// `validation_error` envelope.
#[derive(Clone, Copy, Debug)]
pub struct PathId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(rejection_to_error)?;
        parse_id(&raw).map(PathId)
    }
}

fn rejection_to_error(rejection: PathRejection) -> AppError {
    AppError::Validation(format!("Ruta inválida: {}", rejection.body_text()))
}
