//! Generic query-by-example repository.

use std::marker::PhantomData;

use chrono::Utc;
use tracing::{debug, info};

use crudkit_core::result::AppResult;
use crudkit_core::types::{MatchPolicy, PageRequest, Sort};
use crudkit_entity::entity::soft_delete;
use crudkit_entity::{Entity, FieldAccessor, FieldValue};

use crate::context::PersistenceContext;
use crate::criteria::{CriteriaBuilder, CriteriaQuery, Root};
use crate::predicate::PredicateBuilder;
use crate::runtime::{Example, Page, Pageable, Specification};

/// Repository for any entity type over any persistence context.
///
/// Adds example-driven listing, counting and soft deletion on top of the
/// context's own operations, which are exposed unchanged.
pub struct GenericRepository<T: Entity, C: PersistenceContext<T>> {
    context: C,
    predicates: PredicateBuilder,
    max_page_size: Option<u64>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity, C: PersistenceContext<T>> GenericRepository<T, C> {
    /// Create a repository matching examples on every field.
    pub fn new(context: C) -> Self {
        Self {
            context,
            predicates: PredicateBuilder::default(),
            max_page_size: None,
            _marker: PhantomData,
        }
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.predicates = PredicateBuilder::new(policy);
        self
    }

    /// Cap the page size of [`find_all`](Self::find_all).
    pub fn with_max_page_size(mut self, max: u64) -> Self {
        self.max_page_size = Some(max);
        self
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// The page request [`find_all`](Self::find_all) actually runs, with
    /// the size capped at the configured maximum.
    pub fn effective_page(&self, page: &PageRequest) -> PageRequest {
        match self.max_page_size {
            Some(max) => page.clone().clamped(max),
            None => page.clone(),
        }
    }

    /// List entities equal to `example`, one page at a time.
    ///
    /// `page.page_index` is a row offset. When `page.sort_field` is set
    /// the rows are ordered descending by it; an unknown sort field fails
    /// with a database error.
    pub fn find_all(&self, example: Option<&T>, page: &PageRequest) -> AppResult<Vec<T>> {
        let page = self.effective_page(page);
        let query = self
            .example_query(CriteriaQuery::select(Root::new()), example, page.sort_field.as_deref())?
            .first_result(page.offset())
            .max_results(page.limit());
        debug!(
            table = T::TABLE,
            offset = page.offset(),
            limit = page.limit(),
            "Listing by example"
        );
        self.context.execute(&query)
    }

    /// List every entity equal to `example` without paging.
    pub fn find_all_unpaged(&self, example: Option<&T>, sort_field: Option<&str>) -> AppResult<Vec<T>> {
        let query = self.example_query(CriteriaQuery::select(Root::new()), example, sort_field)?;
        self.context.execute(&query)
    }

    /// Count entities equal to `example`.
    pub fn count(&self, example: Option<&T>) -> AppResult<u64> {
        let query = self.example_query(CriteriaQuery::count(Root::new()), example, None)?;
        self.context.execute_count(&query)
    }

    /// Mark the entities with the given ids as deleted by `deleter`.
    ///
    /// Ids with no stored entity are skipped. The batch is persisted
    /// atomically; an entity lacking the soft-delete fields fails the whole
    /// batch before anything is written. Returns the number of entities
    /// updated.
    pub fn soft_delete_all_by_id(&self, ids: &[T::Id], deleter: &str) -> AppResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut entities = self.context.find_all_by_id(ids)?;
        let deleted_at = Utc::now();
        for entity in &mut entities {
            FieldAccessor::assign(entity, soft_delete::DELETED, FieldValue::Bool(true))?;
            FieldAccessor::assign(entity, soft_delete::DELETER, FieldValue::from(deleter))?;
            FieldAccessor::assign(entity, soft_delete::DELETED_AT, FieldValue::Timestamp(deleted_at))?;
        }

        let updated = self.context.save_all(entities)?.len();
        info!(
            table = T::TABLE,
            requested = ids.len(),
            updated,
            deleter,
            "Soft-deleted entities"
        );
        Ok(updated)
    }

    pub fn find_by_id(&self, id: &T::Id) -> AppResult<Option<T>> {
        self.context.find_by_id(id)
    }

    pub fn find_all_by_id(&self, ids: &[T::Id]) -> AppResult<Vec<T>> {
        self.context.find_all_by_id(ids)
    }

    /// Every stored entity, deleted ones included.
    pub fn list_all(&self) -> AppResult<Vec<T>> {
        self.context.list_all()
    }

    pub fn save(&self, entity: T) -> AppResult<T> {
        self.context.save(entity)
    }

    pub fn save_all(&self, entities: Vec<T>) -> AppResult<Vec<T>> {
        self.context.save_all(entities)
    }

    pub fn find_all_by_spec(&self, spec: &dyn Specification<T>, sort: &Sort) -> AppResult<Vec<T>> {
        self.context.find_all_by_spec(spec, sort)
    }

    pub fn find_page_by_spec(
        &self,
        spec: &dyn Specification<T>,
        pageable: &Pageable,
    ) -> AppResult<Page<T>> {
        self.context.find_page_by_spec(spec, pageable)
    }

    pub fn count_by_spec(&self, spec: &dyn Specification<T>) -> AppResult<u64> {
        self.context.count_by_spec(spec)
    }

    pub fn find_all_by_example(&self, example: &Example<T>, sort: &Sort) -> AppResult<Vec<T>> {
        self.context.find_all_by_example(example, sort)
    }

    pub fn find_one_by_example(&self, example: &Example<T>) -> AppResult<Option<T>> {
        self.context.find_one_by_example(example)
    }

    fn example_query(
        &self,
        query: CriteriaQuery<T>,
        example: Option<&T>,
        sort_field: Option<&str>,
    ) -> AppResult<CriteriaQuery<T>> {
        let root = query.root().clone();
        let cb = CriteriaBuilder;
        let mut query = query.restrict(self.predicates.build(&root, &cb, example));
        if let Some(field) = sort_field.filter(|f| !f.trim().is_empty()) {
            query = query.order_by([cb.desc(root.get(field)?)]);
        }
        Ok(query)
    }
}
