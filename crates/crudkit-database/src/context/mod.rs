//! The persistence-context contract.
//!
//! A context executes criteria queries and persists entities for one
//! entity type. Implementors supply the four storage primitives; the
//! specification and example operations are derived from them.

pub mod memory;

pub use memory::InMemoryContext;

use crudkit_core::error::AppError;
use crudkit_core::result::AppResult;
use crudkit_core::types::Sort;
use crudkit_entity::Entity;

use crate::criteria::{CriteriaBuilder, CriteriaQuery, Order, Root};
use crate::runtime::{Example, Page, Pageable, Specification};

/// Synchronous storage runtime for entities of type `T`.
pub trait PersistenceContext<T: Entity>: Send + Sync {
    /// Execute a row query.
    fn execute(&self, query: &CriteriaQuery<T>) -> AppResult<Vec<T>>;

    /// Execute a count query.
    fn execute_count(&self, query: &CriteriaQuery<T>) -> AppResult<u64>;

    /// Load the entities whose identity is in `ids`. Unknown ids are
    /// omitted from the result.
    fn find_all_by_id(&self, ids: &[T::Id]) -> AppResult<Vec<T>>;

    /// Insert or update every entity in one atomic unit and return them
    /// as stored. On failure nothing is persisted.
    fn save_all(&self, entities: Vec<T>) -> AppResult<Vec<T>>;

    fn find_by_id(&self, id: &T::Id) -> AppResult<Option<T>> {
        Ok(self
            .find_all_by_id(std::slice::from_ref(id))?
            .into_iter()
            .next())
    }

    fn save(&self, entity: T) -> AppResult<T> {
        self.save_all(vec![entity])?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::database(format!("Save on {} returned no row", T::TABLE)))
    }

    /// Every stored entity in storage order.
    fn list_all(&self) -> AppResult<Vec<T>> {
        self.execute(&CriteriaQuery::select(Root::new()))
    }

    fn find_all_by_spec(&self, spec: &dyn Specification<T>, sort: &Sort) -> AppResult<Vec<T>> {
        let root = Root::new();
        let query = spec_query(CriteriaQuery::select(root.clone()), &root, spec)?
            .order_by(orders(&root, sort)?);
        self.execute(&query)
    }

    fn find_page_by_spec(
        &self,
        spec: &dyn Specification<T>,
        pageable: &Pageable,
    ) -> AppResult<Page<T>> {
        let root = Root::new();
        let total = self.count_by_spec(spec)?;
        let query = spec_query(CriteriaQuery::select(root.clone()), &root, spec)?
            .order_by(orders(&root, &pageable.sort)?)
            .first_result(pageable.offset())
            .max_results(pageable.size);
        Ok(Page::new(self.execute(&query)?, pageable, total))
    }

    fn count_by_spec(&self, spec: &dyn Specification<T>) -> AppResult<u64> {
        let root = Root::new();
        let query = spec_query(CriteriaQuery::count(root.clone()), &root, spec)?;
        self.execute_count(&query)
    }

    fn find_all_by_example(&self, example: &Example<T>, sort: &Sort) -> AppResult<Vec<T>> {
        let root = Root::new();
        let query = CriteriaQuery::select(root.clone())
            .restrict(example.to_predicates(&root, &CriteriaBuilder)?)
            .order_by(orders(&root, sort)?);
        self.execute(&query)
    }

    /// The single entity matching `example`.
    ///
    /// Fails with a conflict when more than one entity matches.
    fn find_one_by_example(&self, example: &Example<T>) -> AppResult<Option<T>> {
        let root = Root::new();
        let query = CriteriaQuery::select(root.clone())
            .restrict(example.to_predicates(&root, &CriteriaBuilder)?)
            .max_results(2);
        let mut rows = self.execute(&query)?;
        if rows.len() > 1 {
            return Err(AppError::conflict(format!(
                "Example matched more than one {} row",
                T::TABLE
            )));
        }
        Ok(rows.pop())
    }
}

fn spec_query<T: Entity>(
    query: CriteriaQuery<T>,
    root: &Root<T>,
    spec: &dyn Specification<T>,
) -> AppResult<CriteriaQuery<T>> {
    Ok(query.restrict(spec.to_predicate(root, &CriteriaBuilder)?))
}

fn orders<T: Entity>(root: &Root<T>, sort: &Sort) -> AppResult<Vec<Order>> {
    sort.iter()
        .map(|field| {
            Ok(Order {
                path: root.get(&field.field)?,
                direction: field.direction,
            })
        })
        .collect()
}
