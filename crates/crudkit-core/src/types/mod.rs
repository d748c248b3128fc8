//! Core type definitions used across the crudkit workspace.

pub mod identity;
pub mod matching;
pub mod pagination;
pub mod sorting;

pub use identity::IdentityStrategy;
pub use matching::MatchPolicy;
pub use pagination::PageRequest;
pub use sorting::{Sort, SortDirection, SortField};
