//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crudkit_core::error::{AppError, ErrorKind};

use crate::dto::response::{ResponseResult, ResultCode};

/// HTTP-facing wrapper around [`AppError`].
///
/// The body is always a [`ResponseResult`] envelope. Server-side failures
/// are logged and their details withheld from the client.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, body): (StatusCode, ResponseResult<()>) = match err.kind {
            ErrorKind::Validation => (
                StatusCode::BAD_REQUEST,
                ResponseResult::validate_failed(err.message),
            ),
            ErrorKind::InvalidArgument => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ResponseResult::invalid_args(err.message),
            ),
            ErrorKind::Authentication => (
                StatusCode::UNAUTHORIZED,
                ResponseResult::failed_with(ResultCode::NotLogin, err.message),
            ),
            ErrorKind::Authorization => (
                StatusCode::FORBIDDEN,
                ResponseResult::failed_with(ResultCode::NotPower, err.message),
            ),
            ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                ResponseResult::of(404, "NOT_FOUND", err.message, None),
            ),
            ErrorKind::Conflict => (
                StatusCode::CONFLICT,
                ResponseResult::of(409, "CONFLICT", err.message, None),
            ),
            ErrorKind::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                ResponseResult::of(501, "NOT_IMPLEMENTED", err.message, None),
            ),
            ErrorKind::Field => {
                tracing::error!(error = %err, "Entity field access failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseResult::failed_with(ResultCode::Error, err.message),
                )
            }
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => {
                tracing::error!(error = %err, kind = ?err.kind, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, ResponseResult::exception())
            }
        };

        (status, Json(body)).into_response()
    }
}
