//! Application builder: wires routes and middleware into an Axum app.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use crudkit_core::config::AppConfig;

use crate::middleware;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;

/// Apply the response envelope, request logging, compression, CORS and
/// tracing layers to a fully routed app.
pub fn build_app(routes: Router, config: &AppConfig) -> Router {
    routes
        .layer(axum_middleware::from_fn_with_state(
            Arc::new(config.response.clone()),
            middleware::wrap::wrap_response,
        ))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .layer(build_compression_layer())
        .layer(build_cors_layer(&config.server.cors))
        .layer(TraceLayer::new_for_http())
}
