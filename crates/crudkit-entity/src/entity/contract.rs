//! The persistable entity contract.

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::reflect::Reflect;
use crate::value::{FromFieldValue, IntoFieldValue};

/// Requirements on an entity identity type.
pub trait EntityId:
    Clone
    + Eq
    + Hash
    + Ord
    + Debug
    + Serialize
    + DeserializeOwned
    + IntoFieldValue
    + FromFieldValue
    + Send
    + Sync
    + 'static
{
}

impl<T> EntityId for T where
    T: Clone
        + Eq
        + Hash
        + Ord
        + Debug
        + Serialize
        + DeserializeOwned
        + IntoFieldValue
        + FromFieldValue
        + Send
        + Sync
        + 'static
{
}

/// A persistable type with a unique identity.
///
/// The identity is immutable once assigned. An entity without a persisted
/// identity is new. `Default` produces the blank example that
/// query-by-example compares against.
pub trait Entity: Reflect + Clone + Default + Debug + Send + Sync + 'static {
    /// Identity type.
    type Id: EntityId;

    /// Storage table / collection name.
    const TABLE: &'static str;

    /// Name of the identity field in the field table.
    const ID_FIELD: &'static str = "id";

    /// The assigned identity, if any.
    fn id(&self) -> Option<&Self::Id>;

    /// Assign the identity.
    fn set_id(&mut self, id: Self::Id);

    /// Whether no identity has been assigned yet.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}
