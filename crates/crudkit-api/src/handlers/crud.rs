//! Generic CRUD handlers for any entity served by a `BaseService`.
//!
//! Handlers return bare payloads; the envelope is applied by the
//! response-wrapping middleware. Service calls are synchronous and run on
//! the blocking pool.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crudkit_core::error::AppError;
use crudkit_core::result::AppResult;
use crudkit_entity::Entity;
use crudkit_service::BaseService;

use crate::dto::request::{CountQuery, DeleteRequest, ListQuery, PageQuery};
use crate::dto::response::PageResult;
use crate::error::ApiError;
use crate::extractors::ApiJson;

/// State for the routes of one entity type.
pub struct CrudState<T: Entity> {
    pub service: Arc<dyn BaseService<T>>,
}

impl<T: Entity> Clone for CrudState<T> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Entities that can travel over the wire.
pub trait Resource: Entity + Serialize + DeserializeOwned {}

impl<T: Entity + Serialize + DeserializeOwned> Resource for T {}

async fn blocking<R, F>(f: F) -> Result<R, ApiError>
where
    F: FnOnce() -> AppResult<R> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError(AppError::internal(format!("Blocking task failed: {e}"))))?
        .map_err(ApiError)
}

/// POST /api/{resource}/page
pub async fn page<T: Resource>(
    State(state): State<CrudState<T>>,
    ApiJson(query): ApiJson<PageQuery<T>>,
) -> Result<Json<PageResult<T>>, ApiError> {
    let service = state.service;
    let result = blocking(move || {
        let example = query.example.as_ref();
        let page = service.effective_page(&query.page);
        let list = service.find_all(example, &page)?;
        let total = service.count(example)?;
        let size = page.page_size;
        let page_number = if size == 0 { 1 } else { page.page_index / size + 1 };
        Ok(PageResult::of(list, total, size, page_number))
    })
    .await?;
    Ok(Json(result))
}

/// POST /api/{resource}/list
pub async fn list<T: Resource>(
    State(state): State<CrudState<T>>,
    ApiJson(query): ApiJson<ListQuery<T>>,
) -> Result<Json<Vec<T>>, ApiError> {
    let service = state.service;
    let rows = blocking(move || {
        service.find_all_unpaged(query.example.as_ref(), query.sort_field.as_deref())
    })
    .await?;
    Ok(Json(rows))
}

/// POST /api/{resource}/count
pub async fn count<T: Resource>(
    State(state): State<CrudState<T>>,
    ApiJson(query): ApiJson<CountQuery<T>>,
) -> Result<Json<u64>, ApiError> {
    let service = state.service;
    let total = blocking(move || service.count(query.example.as_ref())).await?;
    Ok(Json(total))
}

/// GET /api/{resource}/{id}
pub async fn get_one<T: Resource>(
    State(state): State<CrudState<T>>,
    Path(id): Path<T::Id>,
) -> Result<Json<T>, ApiError> {
    let service = state.service;
    let entity = blocking(move || {
        service
            .find_by_id(&id)?
            .ok_or_else(|| AppError::not_found(format!("No {} with id {id:?}", T::TABLE)))
    })
    .await?;
    Ok(Json(entity))
}

/// POST /api/{resource}
pub async fn save<T: Resource>(
    State(state): State<CrudState<T>>,
    ApiJson(entity): ApiJson<T>,
) -> Result<Json<T>, ApiError> {
    let service = state.service;
    let saved = blocking(move || service.save(entity)).await?;
    Ok(Json(saved))
}

/// POST /api/{resource}/delete
pub async fn delete<T: Resource>(
    State(state): State<CrudState<T>>,
    ApiJson(req): ApiJson<DeleteRequest<T::Id>>,
) -> Result<Json<usize>, ApiError> {
    let service = state.service;
    let updated = blocking(move || service.delete_ids(&req.ids, &req.deleter)).await?;
    Ok(Json(updated))
}
