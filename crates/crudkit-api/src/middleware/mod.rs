//! Axum middleware stack.

pub mod compression;
pub mod cors;
pub mod logging;
pub mod wrap;

pub use wrap::wrap_response;
