//! Entity contracts and the shared base entity shapes.

pub mod base;
pub mod contract;

pub use base::{DefaultBaseEntity, SimpleBaseEntity, soft_delete};
pub use contract::{Entity, EntityId};
