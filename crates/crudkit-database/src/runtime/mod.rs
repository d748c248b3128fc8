//! Runtime-built queries: specifications, query-by-example probes and
//! page-number paging.

pub mod example;
pub mod page;
pub mod specification;

pub use example::{Example, ExampleMatcher};
pub use page::{Page, Pageable};
pub use specification::Specification;
