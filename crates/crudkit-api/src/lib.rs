//! # crudkit-api
//!
//! HTTP API layer for crudkit built on Axum.
//!
//! Provides the `ResponseResult` envelope and the middleware that applies
//! it, error mapping from `AppError`, a generic set of CRUD routes for any
//! entity served by a `BaseService`, and the health and password-policy
//! endpoints.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use router::{build_router, crud_routes};
pub use state::AppState;
