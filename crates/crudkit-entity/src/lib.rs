//! # crudkit-entity
//!
//! Entity contracts and field introspection for crudkit. Every entity
//! registers a field table through [`reflect!`], which lets the generic
//! repository read and write fields by name across the entity's ancestor
//! chain without knowing its concrete shape.

pub mod accessor;
pub mod entity;
pub mod id;
pub mod reflect;
pub mod validation;
pub mod value;

pub use accessor::{FieldAccessor, FieldResolution};
pub use entity::{DefaultBaseEntity, Entity, EntityId, SimpleBaseEntity};
pub use id::{IdGenerator, SimpleUuidGenerator, UuidGenerator};
pub use reflect::{FieldError, Reflect};
pub use value::{FieldValue, FromFieldValue, IntoFieldValue};
