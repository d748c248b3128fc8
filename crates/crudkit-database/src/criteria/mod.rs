//! Criteria-style query construction.
//!
//! Queries are assembled from a [`Root`] naming the entity, [`Path`]s to
//! its attributes, [`Predicate`]s and [`Order`]s produced by the
//! [`CriteriaBuilder`], and finally a [`CriteriaQuery`] carrying selection
//! and paging. Attribute paths are checked against the entity's field
//! table when they are created, so an executed query only ever references
//! fields that exist.

pub mod sql;

use std::fmt;
use std::marker::PhantomData;

use crudkit_core::error::AppError;
use crudkit_core::result::AppResult;
use crudkit_core::types::SortDirection;
use crudkit_entity::{Entity, FieldAccessor, FieldValue, Reflect};

/// A checked reference to an entity attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    attribute: &'static str,
}

impl Path {
    /// The attribute name.
    pub fn attribute(&self) -> &'static str {
        self.attribute
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute)
    }
}

/// The entity a query ranges over.
pub struct Root<T> {
    attributes: Vec<&'static str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Root<T> {
    pub fn new() -> Self {
        Self {
            attributes: FieldAccessor::field_names(&T::default()),
            _marker: PhantomData,
        }
    }

    /// The table / collection name.
    pub fn table(&self) -> &'static str {
        T::TABLE
    }

    /// Every attribute visible on the entity.
    pub fn attributes(&self) -> &[&'static str] {
        &self.attributes
    }

    /// Resolve an attribute path.
    ///
    /// Fails with a database error when the entity has no such attribute.
    pub fn get(&self, attribute: &str) -> AppResult<Path> {
        self.attributes
            .iter()
            .find(|name| **name == attribute)
            .map(|name| Path { attribute: *name })
            .ok_or_else(|| {
                AppError::database(format!(
                    "Unable to locate attribute '{attribute}' on {}",
                    T::TABLE
                ))
            })
    }
}

impl<T: Entity> Default for Root<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Root<T> {
    fn clone(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Root<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// A boolean condition over one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `path = value`; against `Null` this means "is null".
    Equal(Path, FieldValue),
    /// `path <> value`; against `Null` this means "is not null".
    NotEqual(Path, FieldValue),
    /// All of the nested predicates hold.
    And(Vec<Predicate>),
    /// At least one of the nested predicates holds.
    Or(Vec<Predicate>),
    /// The nested predicate does not hold.
    Not(Box<Predicate>),
}

impl Predicate {
    /// Evaluate the predicate against a row.
    pub fn matches(&self, row: &dyn Reflect) -> bool {
        match self {
            Self::Equal(path, value) => Self::read(row, path) == *value,
            Self::NotEqual(path, value) => Self::read(row, path) != *value,
            Self::And(all) => all.iter().all(|p| p.matches(row)),
            Self::Or(any) => any.iter().any(|p| p.matches(row)),
            Self::Not(inner) => !inner.matches(row),
        }
    }

    fn read(row: &dyn Reflect, path: &Path) -> FieldValue {
        FieldAccessor::get(row, path.attribute()).unwrap_or(FieldValue::Null)
    }
}

/// An ordering term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub path: Path,
    pub direction: SortDirection,
}

/// Factory for predicates and orderings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriteriaBuilder;

impl CriteriaBuilder {
    pub fn equal(&self, path: Path, value: impl Into<FieldValue>) -> Predicate {
        Predicate::Equal(path, value.into())
    }

    pub fn not_equal(&self, path: Path, value: impl Into<FieldValue>) -> Predicate {
        Predicate::NotEqual(path, value.into())
    }

    pub fn is_null(&self, path: Path) -> Predicate {
        Predicate::Equal(path, FieldValue::Null)
    }

    pub fn and(&self, predicates: Vec<Predicate>) -> Predicate {
        Predicate::And(predicates)
    }

    pub fn or(&self, predicates: Vec<Predicate>) -> Predicate {
        Predicate::Or(predicates)
    }

    pub fn not(&self, predicate: Predicate) -> Predicate {
        Predicate::Not(Box::new(predicate))
    }

    pub fn asc(&self, path: Path) -> Order {
        Order {
            path,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(&self, path: Path) -> Order {
        Order {
            path,
            direction: SortDirection::Desc,
        }
    }
}

/// What a query projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Whole entities.
    Rows,
    /// A single row count.
    Count,
}

/// A complete query: root, restrictions, ordering and paging.
///
/// Restrictions are conjunctive. Paging applies to [`Selection::Rows`]
/// only.
#[derive(Debug, Clone)]
pub struct CriteriaQuery<T> {
    root: Root<T>,
    selection: Selection,
    restrictions: Vec<Predicate>,
    order: Vec<Order>,
    first_result: u64,
    max_results: Option<u64>,
}

impl<T: Entity> CriteriaQuery<T> {
    /// Select whole rows from `root`.
    pub fn select(root: Root<T>) -> Self {
        Self::with_selection(root, Selection::Rows)
    }

    /// Count rows of `root`.
    pub fn count(root: Root<T>) -> Self {
        Self::with_selection(root, Selection::Count)
    }

    fn with_selection(root: Root<T>, selection: Selection) -> Self {
        Self {
            root,
            selection,
            restrictions: Vec::new(),
            order: Vec::new(),
            first_result: 0,
            max_results: None,
        }
    }

    /// Add restrictions; all of them must hold.
    pub fn restrict(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.restrictions.extend(predicates);
        self
    }

    pub fn order_by(mut self, order: impl IntoIterator<Item = Order>) -> Self {
        self.order.extend(order);
        self
    }

    /// Skip this many rows.
    pub fn first_result(mut self, offset: u64) -> Self {
        self.first_result = offset;
        self
    }

    /// Return at most this many rows.
    pub fn max_results(mut self, limit: u64) -> Self {
        self.max_results = Some(limit);
        self
    }

    pub fn root(&self) -> &Root<T> {
        &self.root
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn restrictions(&self) -> &[Predicate] {
        &self.restrictions
    }

    pub fn ordering(&self) -> &[Order] {
        &self.order
    }

    pub fn offset(&self) -> u64 {
        self.first_result
    }

    pub fn limit(&self) -> Option<u64> {
        self.max_results
    }

    /// Whether `row` satisfies every restriction.
    pub fn admits(&self, row: &T) -> bool {
        self.restrictions.iter().all(|p| p.matches(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_entity::reflect;

    #[derive(Debug, Clone, Default)]
    struct Gadget {
        id: Option<String>,
        name: String,
        stock: i64,
    }

    reflect! {
        impl for Gadget {
            fields: [id, name, stock];
        }
    }

    impl Entity for Gadget {
        type Id = String;
        const TABLE: &'static str = "gadgets";

        fn id(&self) -> Option<&String> {
            self.id.as_ref()
        }

        fn set_id(&mut self, id: String) {
            self.id = Some(id);
        }
    }

    #[test]
    fn test_root_rejects_unknown_attribute() {
        let root = Root::<Gadget>::new();
        assert_eq!(root.get("stock").unwrap().attribute(), "stock");
        let err = root.get("price").unwrap_err();
        assert_eq!(err.kind, crudkit_core::error::ErrorKind::Database);
    }

    #[test]
    fn test_predicate_evaluation() {
        let root = Root::<Gadget>::new();
        let cb = CriteriaBuilder;
        let gadget = Gadget {
            id: None,
            name: "lamp".to_string(),
            stock: 3,
        };

        assert!(cb.equal(root.get("name").unwrap(), "lamp").matches(&gadget));
        assert!(cb.is_null(root.get("id").unwrap()).matches(&gadget));
        assert!(
            cb.or(vec![
                cb.equal(root.get("stock").unwrap(), 4),
                cb.not(cb.equal(root.get("name").unwrap(), "desk")),
            ])
            .matches(&gadget)
        );
        assert!(
            !cb.and(vec![
                cb.equal(root.get("stock").unwrap(), 3),
                cb.not_equal(root.get("name").unwrap(), "lamp"),
            ])
            .matches(&gadget)
        );
    }
}
