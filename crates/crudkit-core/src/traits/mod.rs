//! Core traits shared by the crudkit crates.

pub mod service;

pub use service::Service;
