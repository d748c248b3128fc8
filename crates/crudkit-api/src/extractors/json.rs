//! JSON body extractor whose rejections use the response envelope.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;

use crudkit_core::error::AppError;

use crate::error::ApiError;

/// Like [`Json`], but a malformed body becomes a `VALIDATE_FAILED`
/// envelope instead of a plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError(AppError::validation(format!(
                "Request body is malformed or missing required fields: {}",
                rejection.body_text()
            )))),
        }
    }
}
