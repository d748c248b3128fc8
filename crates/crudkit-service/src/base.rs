//! Generic CRUD service facade.

use std::sync::Arc;

use tracing::debug;

use crudkit_core::result::AppResult;
use crudkit_core::traits::Service;
use crudkit_core::types::{PageRequest, Sort};
use crudkit_database::{
    Example, GenericRepository, Page, Pageable, PersistenceContext, Specification,
};
use crudkit_entity::Entity;

/// Service-layer contract for any entity type.
///
/// Mirrors the repository operation for operation. Implementations may
/// layer business rules on top; [`BaseServiceImpl`] adds none.
pub trait BaseService<T: Entity>: Service {
    /// List entities equal to `example`, `page.page_index` rows in.
    fn find_all(&self, example: Option<&T>, page: &PageRequest) -> AppResult<Vec<T>>;

    /// The page request `find_all` runs for `page`, after size capping.
    fn effective_page(&self, page: &PageRequest) -> PageRequest {
        page.clone()
    }

    fn find_all_unpaged(&self, example: Option<&T>, sort_field: Option<&str>) -> AppResult<Vec<T>>;

    fn count(&self, example: Option<&T>) -> AppResult<u64>;

    /// Soft-delete the given ids, returning how many were updated.
    fn soft_delete_all_by_id(&self, ids: &[T::Id], deleter: &str) -> AppResult<usize>;

    /// Alias of [`soft_delete_all_by_id`](Self::soft_delete_all_by_id).
    fn delete_ids(&self, ids: &[T::Id], deleter: &str) -> AppResult<usize> {
        self.soft_delete_all_by_id(ids, deleter)
    }

    fn list_all(&self) -> AppResult<Vec<T>>;

    fn find_by_id(&self, id: &T::Id) -> AppResult<Option<T>>;

    fn find_all_by_id(&self, ids: &[T::Id]) -> AppResult<Vec<T>>;

    fn save(&self, entity: T) -> AppResult<T>;

    fn save_all(&self, entities: Vec<T>) -> AppResult<Vec<T>>;

    fn find_all_by_spec(&self, spec: &dyn Specification<T>, sort: &Sort) -> AppResult<Vec<T>>;

    fn find_page_by_spec(&self, spec: &dyn Specification<T>, pageable: &Pageable) -> AppResult<Page<T>>;

    fn count_by_spec(&self, spec: &dyn Specification<T>) -> AppResult<u64>;

    fn find_all_by_example(&self, example: &Example<T>, sort: &Sort) -> AppResult<Vec<T>>;

    fn find_one_by_example(&self, example: &Example<T>) -> AppResult<Option<T>>;
}

/// Pass-through [`BaseService`] over a shared repository.
pub struct BaseServiceImpl<T: Entity, C: PersistenceContext<T>> {
    repository: Arc<GenericRepository<T, C>>,
}

impl<T: Entity, C: PersistenceContext<T>> Clone for BaseServiceImpl<T, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<T: Entity, C: PersistenceContext<T>> BaseServiceImpl<T, C> {
    /// Creates a new service over `repository`.
    pub fn new(repository: Arc<GenericRepository<T, C>>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &GenericRepository<T, C> {
        &self.repository
    }
}

impl<T: Entity, C: PersistenceContext<T> + 'static> Service for BaseServiceImpl<T, C> {}

impl<T: Entity, C: PersistenceContext<T> + 'static> BaseService<T> for BaseServiceImpl<T, C> {
    fn find_all(&self, example: Option<&T>, page: &PageRequest) -> AppResult<Vec<T>> {
        self.repository.find_all(example, page)
    }

    fn effective_page(&self, page: &PageRequest) -> PageRequest {
        self.repository.effective_page(page)
    }

    fn find_all_unpaged(&self, example: Option<&T>, sort_field: Option<&str>) -> AppResult<Vec<T>> {
        self.repository.find_all_unpaged(example, sort_field)
    }

    fn count(&self, example: Option<&T>) -> AppResult<u64> {
        self.repository.count(example)
    }

    fn soft_delete_all_by_id(&self, ids: &[T::Id], deleter: &str) -> AppResult<usize> {
        debug!(table = T::TABLE, count = ids.len(), "Deleting by id");
        self.repository.soft_delete_all_by_id(ids, deleter)
    }

    fn list_all(&self) -> AppResult<Vec<T>> {
        self.repository.list_all()
    }

    fn find_by_id(&self, id: &T::Id) -> AppResult<Option<T>> {
        self.repository.find_by_id(id)
    }

    fn find_all_by_id(&self, ids: &[T::Id]) -> AppResult<Vec<T>> {
        self.repository.find_all_by_id(ids)
    }

    fn save(&self, entity: T) -> AppResult<T> {
        self.repository.save(entity)
    }

    fn save_all(&self, entities: Vec<T>) -> AppResult<Vec<T>> {
        self.repository.save_all(entities)
    }

    fn find_all_by_spec(&self, spec: &dyn Specification<T>, sort: &Sort) -> AppResult<Vec<T>> {
        self.repository.find_all_by_spec(spec, sort)
    }

    fn find_page_by_spec(&self, spec: &dyn Specification<T>, pageable: &Pageable) -> AppResult<Page<T>> {
        self.repository.find_page_by_spec(spec, pageable)
    }

    fn count_by_spec(&self, spec: &dyn Specification<T>) -> AppResult<u64> {
        self.repository.count_by_spec(spec)
    }

    fn find_all_by_example(&self, example: &Example<T>, sort: &Sort) -> AppResult<Vec<T>> {
        self.repository.find_all_by_example(example, sort)
    }

    fn find_one_by_example(&self, example: &Example<T>) -> AppResult<Option<T>> {
        self.repository.find_one_by_example(example)
    }
}
