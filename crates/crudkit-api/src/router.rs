//! Route definitions for the crudkit HTTP API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crudkit_service::BaseService;

use crate::handlers;
use crate::handlers::crud::{CrudState, Resource};
use crate::state::AppState;

/// Application-level routes (health, password policy) under `/api`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/passwords/check", post(handlers::password::check_password));

    Router::new().nest("/api", api_routes).with_state(state)
}

/// CRUD routes for one entity type, to be nested under its resource path.
///
/// | Method | Path      | Operation                         |
/// |--------|-----------|-----------------------------------|
/// | POST   | `/`       | save                              |
/// | GET    | `/{id}`   | find by id                        |
/// | POST   | `/page`   | paged listing by example + total  |
/// | POST   | `/list`   | unpaged listing by example        |
/// | POST   | `/count`  | count by example                  |
/// | POST   | `/delete` | soft delete by ids                |
pub fn crud_routes<T: Resource>(service: Arc<dyn BaseService<T>>) -> Router {
    use handlers::crud;

    Router::new()
        .route("/", post(crud::save::<T>))
        .route("/{id}", get(crud::get_one::<T>))
        .route("/page", post(crud::page::<T>))
        .route("/list", post(crud::list::<T>))
        .route("/count", post(crud::count::<T>))
        .route("/delete", post(crud::delete::<T>))
        .with_state(CrudState { service })
}
