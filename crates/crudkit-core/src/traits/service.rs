//! Service marker trait.

/// Marker trait for business logic services.
///
/// Every service facade implements this trait so that calling code can hold
/// services uniformly behind `Arc`.
pub trait Service: Send + Sync + 'static {}
