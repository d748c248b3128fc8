//! Password policy handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::PasswordCheckRequest;
use crate::dto::response::PasswordCheckResponse;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /api/passwords/check
pub async fn check_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PasswordCheckRequest>,
) -> Json<PasswordCheckResponse> {
    let message = state.password_validator.strength_message(&req.password);
    Json(PasswordCheckResponse {
        strong: message.is_none(),
        message,
    })
}
