//! # crudkit-service
//!
//! Service facades. [`BaseService`] is the contract callers program
//! against; [`BaseServiceImpl`] forwards every operation to a
//! [`GenericRepository`](crudkit_database::GenericRepository).

pub mod base;

pub use base::{BaseService, BaseServiceImpl};
