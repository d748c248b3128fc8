//! # crudkit-core
//!
//! Core crate for crudkit. Contains the unified error system, configuration
//! schemas, pagination/sorting types and the query-by-example policy
//! switches shared by every other crate.
//!
//! This crate has **no** internal dependencies on other crudkit crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
