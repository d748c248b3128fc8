//! Wraps successful handler output in the `ResponseResult` envelope.
//!
//! Handlers return their payload as plain JSON (or text, or nothing) and
//! this middleware turns it into `{code, status, message, data}`. Bodies
//! that already are an envelope, non-success responses, other content
//! types and paths outside the configured prefixes pass through untouched.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crudkit_core::config::ResponseConfig;
use crudkit_core::error::AppError;

use crate::dto::response::ResponseResult;
use crate::error::ApiError;

const ENVELOPE_KEYS: [&str; 4] = ["code", "status", "message", "data"];

/// Response-wrapping middleware; install with
/// `axum::middleware::from_fn_with_state(Arc::new(config), wrap_response)`.
pub async fn wrap_response(
    State(config): State<Arc<ResponseConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let applies = config.applies_to(request.uri().path()) && request.method() != Method::HEAD;
    let response = next.run(request).await;
    if !applies || !carries_body(response.status()) {
        return response;
    }

    let kind = BodyKind::of(&response);
    if kind == BodyKind::Other {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError(AppError::internal(format!("Failed to buffer response body: {e}")))
                .into_response();
        }
    };

    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        match kind {
            BodyKind::Json => match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) if is_envelope(&value) => {
                    return Response::from_parts(parts, Body::from(bytes));
                }
                Ok(value) => value,
                Err(_) => return Response::from_parts(parts, Body::from(bytes)),
            },
            _ => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        }
    };

    let wrapped = match serde_json::to_vec(&ResponseResult::success(payload)) {
        Ok(wrapped) => wrapped,
        Err(e) => return ApiError(AppError::from(e)).into_response(),
    };
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(wrapped))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Text,
    /// Binary or otherwise opaque; never wrapped.
    Other,
}

impl BodyKind {
    fn of(response: &Response) -> Self {
        let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        else {
            // No content type: only an empty body is expected here.
            return Self::Text;
        };
        if content_type.starts_with("application/json") {
            Self::Json
        } else if content_type.starts_with("text/plain") {
            Self::Text
        } else {
            Self::Other
        }
    }
}

/// Success statuses that may carry a body; 204 and 304 never do.
fn carries_body(status: StatusCode) -> bool {
    status.is_success() && status != StatusCode::NO_CONTENT && status != StatusCode::NOT_MODIFIED
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.len() == ENVELOPE_KEYS.len() && ENVELOPE_KEYS.iter().all(|k| map.contains_key(*k)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::get;
    use tower::ServiceExt;

    fn app(config: ResponseConfig) -> Router {
        Router::new()
            .route("/api/json", get(|| async { axum::Json(serde_json::json!({"n": 1})) }))
            .route("/api/text", get(|| async { "hello" }))
            .route("/api/empty", get(|| async { StatusCode::OK }))
            .route(
                "/api/wrapped",
                get(|| async { axum::Json(ResponseResult::success_with(7, "done")) }),
            )
            .route("/api/missing", get(|| async { StatusCode::NOT_FOUND }))
            .route("/api/gone", get(|| async { StatusCode::NO_CONTENT }))
            .route("/open/json", get(|| async { axum::Json(serde_json::json!([1])) }))
            .layer(axum::middleware::from_fn_with_state(Arc::new(config), wrap_response))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
        call_with(app, Method::GET, uri).await
    }

    async fn call_with(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_wraps_json_text_and_empty() {
        let (_, json) = call(app(ResponseConfig::default()), "/api/json").await;
        assert_eq!(json["code"], 200);
        assert_eq!(json["data"]["n"], 1);

        let (_, text) = call(app(ResponseConfig::default()), "/api/text").await;
        assert_eq!(text["data"], "hello");

        let (_, empty) = call(app(ResponseConfig::default()), "/api/empty").await;
        assert_eq!(empty["status"], "SUCCESS");
        assert!(empty["data"].is_null());
    }

    #[tokio::test]
    async fn test_existing_envelope_not_rewrapped() {
        let (_, json) = call(app(ResponseConfig::default()), "/api/wrapped").await;
        assert_eq!(json["data"], 7);
        assert_eq!(json["message"], "done");
    }

    #[tokio::test]
    async fn test_skips_failures_and_foreign_paths() {
        let (status, _) = call(app(ResponseConfig::default()), "/api/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, json) = call(app(ResponseConfig::default()), "/open/json").await;
        assert_eq!(json, serde_json::json!([1]));
    }

    #[tokio::test]
    async fn test_disabled_config_passes_through() {
        let config = ResponseConfig {
            enabled: false,
            ..ResponseConfig::default()
        };
        let (_, json) = call(app(config), "/api/json").await;
        assert_eq!(json, serde_json::json!({"n": 1}));
    }

    #[tokio::test]
    async fn test_bodyless_responses_stay_empty() {
        let (status, body) = call(app(ResponseConfig::default()), "/api/gone").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (status, body) = call_with(app(ResponseConfig::default()), Method::HEAD, "/api/empty").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());
    }
}
