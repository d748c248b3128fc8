//! In-memory persistence context.

use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crudkit_core::error::AppError;
use crudkit_core::result::AppResult;
use crudkit_core::types::IdentityStrategy;
use crudkit_entity::id::assign_identity;
use crudkit_entity::{Entity, FieldAccessor, FieldValue, IdGenerator};

use crate::context::PersistenceContext;
use crate::criteria::CriteriaQuery;

/// Vec-backed context. Insertion order is the storage-default order.
///
/// Clone-friendly via `Arc`; clones share the same rows.
pub struct InMemoryContext<T: Entity> {
    rows: Arc<RwLock<Vec<T>>>,
    generator: Arc<dyn IdGenerator<T::Id>>,
    strategy: IdentityStrategy,
}

impl<T: Entity> Clone for InMemoryContext<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            generator: Arc::clone(&self.generator),
            strategy: self.strategy,
        }
    }
}

impl<T: Entity> InMemoryContext<T> {
    /// Empty context assigning identities from `generator`.
    pub fn new(generator: impl IdGenerator<T::Id> + 'static) -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            generator: Arc::new(generator),
            strategy: IdentityStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: IdentityStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> IdentityStrategy {
        self.strategy
    }

    /// Number of stored rows, deleted ones included.
    pub fn len(&self) -> AppResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<T>>> {
        self.rows
            .read()
            .map_err(|_| AppError::database("lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.rows
            .write()
            .map_err(|_| AppError::database("lock poisoned"))
    }

    fn matching<'a>(rows: &'a [T], query: &CriteriaQuery<T>) -> Vec<&'a T> {
        rows.iter().filter(|row| query.admits(row)).collect()
    }
}

impl<T: Entity> PersistenceContext<T> for InMemoryContext<T> {
    fn execute(&self, query: &CriteriaQuery<T>) -> AppResult<Vec<T>> {
        let rows = self.read()?;
        let mut matched = Self::matching(&rows, query);

        if !query.ordering().is_empty() {
            matched.sort_by(|a, b| {
                query
                    .ordering()
                    .iter()
                    .map(|order| {
                        let field = order.path.attribute();
                        let left = FieldAccessor::get(*a, field).unwrap_or(FieldValue::Null);
                        let right = FieldAccessor::get(*b, field).unwrap_or(FieldValue::Null);
                        let ordering = left.sort_cmp(&right);
                        match order.direction {
                            crudkit_core::types::SortDirection::Asc => ordering,
                            crudkit_core::types::SortDirection::Desc => ordering.reverse(),
                        }
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = query
            .limit()
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        let result: Vec<T> = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        debug!(table = T::TABLE, rows = result.len(), "Executed criteria query");
        Ok(result)
    }

    fn execute_count(&self, query: &CriteriaQuery<T>) -> AppResult<u64> {
        let rows = self.read()?;
        Ok(Self::matching(&rows, query).len() as u64)
    }

    fn find_all_by_id(&self, ids: &[T::Id]) -> AppResult<Vec<T>> {
        let wanted: HashSet<&T::Id> = ids.iter().collect();
        let rows = self.read()?;
        Ok(rows
            .iter()
            .filter(|row| row.id().is_some_and(|id| wanted.contains(id)))
            .cloned()
            .collect())
    }

    fn save_all(&self, entities: Vec<T>) -> AppResult<Vec<T>> {
        let mut rows = self.write()?;
        // Stage against a copy so the batch lands all at once.
        let mut staged = rows.clone();
        let mut saved = Vec::with_capacity(entities.len());

        for mut entity in entities {
            let existing = entity
                .id()
                .and_then(|id| staged.iter().position(|row| row.id() == Some(id)));
            match existing {
                Some(index) => staged[index] = entity.clone(),
                None => {
                    assign_identity(&mut entity, self.strategy, self.generator.as_ref());
                    staged.push(entity.clone());
                }
            }
            saved.push(entity);
        }

        *rows = staged;
        debug!(table = T::TABLE, rows = saved.len(), "Saved entities");
        Ok(saved)
    }
}
