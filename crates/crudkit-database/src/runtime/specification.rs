//! Predicate factories over a query root.

use crudkit_core::result::AppResult;
use crudkit_entity::Entity;

use crate::criteria::{CriteriaBuilder, Predicate, Root};

/// Builds an optional restriction for a query over `T`.
///
/// Returning `Ok(None)` leaves the query unrestricted. Closures of the
/// matching shape are specifications:
///
/// ```ignore
/// let active = |root: &Root<Account>, cb: &CriteriaBuilder| -> AppResult<Option<Predicate>> {
///     Ok(Some(cb.equal(root.get("enabled")?, true)))
/// };
/// repository.count_by_spec(&active)?;
/// ```
pub trait Specification<T: Entity>: Send + Sync {
    fn to_predicate(&self, root: &Root<T>, cb: &CriteriaBuilder) -> AppResult<Option<Predicate>>;
}

impl<T, F> Specification<T> for F
where
    T: Entity,
    F: Fn(&Root<T>, &CriteriaBuilder) -> AppResult<Option<Predicate>> + Send + Sync,
{
    fn to_predicate(&self, root: &Root<T>, cb: &CriteriaBuilder) -> AppResult<Option<Predicate>> {
        self(root, cb)
    }
}
