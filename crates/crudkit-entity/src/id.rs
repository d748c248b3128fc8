//! Identity generation strategies.

use uuid::Uuid;

use crudkit_core::types::IdentityStrategy;

use crate::entity::Entity;
use crate::value::IntoFieldValue;

/// Produces fresh unique identities.
pub trait IdGenerator<Id>: Send + Sync {
    /// Generate a new identity.
    fn generate(&self) -> Id;
}

/// 32-character lowercase hex identities (a v4 UUID without hyphens).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleUuidGenerator;

impl IdGenerator<String> for SimpleUuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Random v4 UUID identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator<Uuid> for UuidGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Give `entity` an identity according to `strategy`.
///
/// Under [`IdentityStrategy::ReuseIfPresent`] an assigned identity is kept
/// unless it renders as blank text. Returns whether a new identity was
/// generated.
pub fn assign_identity<T: Entity>(
    entity: &mut T,
    strategy: IdentityStrategy,
    generator: &dyn IdGenerator<T::Id>,
) -> bool {
    let reusable = match strategy {
        IdentityStrategy::AlwaysGenerate => false,
        IdentityStrategy::ReuseIfPresent => entity
            .id()
            .is_some_and(|id| !id.to_field_value().is_blank()),
    };
    if reusable {
        return false;
    }
    entity.set_id(generator.generate());
    true
}
