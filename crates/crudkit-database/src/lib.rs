//! # crudkit-database
//!
//! Criteria-style query construction, the persistence-context contract the
//! storage runtime implements, an in-memory runtime, PostgreSQL rendering of
//! criteria queries, and the generic query-by-example repository built on
//! top of them.
//!
//! Every operation here is synchronous and runs to completion on the
//! caller's thread.

pub mod context;
pub mod criteria;
pub mod predicate;
pub mod repository;
pub mod runtime;

pub use context::{InMemoryContext, PersistenceContext};
pub use criteria::{CriteriaBuilder, CriteriaQuery, Order, Path, Predicate, Root};
pub use predicate::PredicateBuilder;
pub use repository::GenericRepository;
pub use runtime::{Example, ExampleMatcher, Page, Pageable, Specification};
