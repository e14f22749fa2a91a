//! JSON body extractor whose rejections use the standard error envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a missing, malformed or mistyped body becomes a 400
/// `validation_error` instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct BodyJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for BodyJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(BodyJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let detail = match &rejection {
        JsonRejection::MissingJsonContentType(_) => "se esperaba Content-Type: application/json".to_string(),
        _ => rejection.body_text(),
    };
    AppError::Validation(format!("Cuerpo de la petición inválido: {}", detail))
}
