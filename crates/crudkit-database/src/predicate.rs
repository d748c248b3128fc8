//! Equality predicates derived from an example entity.

use tracing::warn;

use crudkit_core::types::MatchPolicy;
use crudkit_entity::{Entity, FieldAccessor};

use crate::criteria::{CriteriaBuilder, Predicate, Root};

/// Turns the fields of an example entity into equality restrictions.
///
/// Under [`MatchPolicy::MatchAllFields`] every visible field (ancestors
/// included) is constrained, so a null field only matches null columns.
/// Under [`MatchPolicy::MatchNonDefaultFields`] fields still equal to the
/// value in `T::default()` are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateBuilder {
    policy: MatchPolicy,
}

impl PredicateBuilder {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Restrictions for `example`; empty when there is no example.
    ///
    /// A field the root cannot resolve is skipped with a warning rather
    /// than failing the query.
    pub fn build<T: Entity>(
        &self,
        root: &Root<T>,
        cb: &CriteriaBuilder,
        example: Option<&T>,
    ) -> Vec<Predicate> {
        let Some(example) = example else {
            return Vec::new();
        };
        let blank = match self.policy {
            MatchPolicy::MatchAllFields => None,
            MatchPolicy::MatchNonDefaultFields => Some(T::default()),
        };

        FieldAccessor::snapshot(example)
            .into_iter()
            .filter(|(name, value)| match &blank {
                Some(blank) => FieldAccessor::get(blank, name).as_ref() != Some(value),
                None => true,
            })
            .filter_map(|(name, value)| match root.get(name) {
                Ok(path) => Some(cb.equal(path, value)),
                Err(e) => {
                    warn!(table = T::TABLE, field = name, error = %e, "Skipped unresolvable example field");
                    None
                }
            })
            .collect()
    }
}
