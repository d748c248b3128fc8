//! Demo entity served by the binary.

use serde::{Deserialize, Serialize};

use crudkit_entity::{Entity, SimpleBaseEntity, reflect};

/// A customer record with the standard audit and soft-delete fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(flatten)]
    pub base: SimpleBaseEntity<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub tier: i64,
}

reflect! {
    impl for Customer {
        parent: base;
        fields: [name, email, tier];
    }
}

impl Entity for Customer {
    type Id = String;
    const TABLE: &'static str = "customers";

    fn id(&self) -> Option<&String> {
        self.base.id()
    }

    fn set_id(&mut self, id: String) {
        self.base.set_id(id);
    }
}
