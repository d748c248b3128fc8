//! Base entity shapes that concrete entities embed.
//!
//! `DefaultBaseEntity` carries the identity; `SimpleBaseEntity` embeds it
//! and adds the soft-delete and audit fields. A concrete entity embeds
//! `SimpleBaseEntity` as its `base` and names it as the parent in its
//! field table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::contract::EntityId;
use crate::reflect;

/// Field names written by a soft delete.
pub mod soft_delete {
    pub const DELETED: &str = "deleted";
    pub const DELETER: &str = "deleter";
    pub const DELETED_AT: &str = "deleted_at";
}

/// Identity-only base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultBaseEntity<ID> {
    /// Assigned on first persistence unless already set.
    pub id: Option<ID>,
}

impl<ID> Default for DefaultBaseEntity<ID> {
    fn default() -> Self {
        Self { id: None }
    }
}

reflect! {
    impl[ID: EntityId] for DefaultBaseEntity<ID> {
        fields: [id];
    }
}

/// Identity plus soft-delete and audit fields.
///
/// `deleted = true` implies `deleter` and `deleted_at` are set. Rows are
/// never physically removed; deletion flips the flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleBaseEntity<ID> {
    #[serde(flatten)]
    pub base: DefaultBaseEntity<ID>,
    pub enabled: bool,
    pub visible: bool,
    pub deleted: bool,
    pub creator: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modifier: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub deleter: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub remark: Option<String>,
}

impl<ID> Default for SimpleBaseEntity<ID> {
    fn default() -> Self {
        Self {
            base: DefaultBaseEntity::default(),
            enabled: true,
            visible: true,
            deleted: false,
            creator: None,
            created_at: None,
            modifier: None,
            modified_at: None,
            deleter: None,
            deleted_at: None,
            remark: None,
        }
    }
}

impl<ID> SimpleBaseEntity<ID> {
    /// A base with the identity already assigned.
    pub fn with_id(id: ID) -> Self {
        Self {
            base: DefaultBaseEntity { id: Some(id) },
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<&ID> {
        self.base.id.as_ref()
    }

    pub fn set_id(&mut self, id: ID) {
        self.base.id = Some(id);
    }

    /// Stamp creation audit fields.
    pub fn stamp_created(&mut self, creator: impl Into<String>) {
        self.creator = Some(creator.into());
        self.created_at = Some(Utc::now());
    }

    /// Stamp modification audit fields.
    pub fn stamp_modified(&mut self, modifier: impl Into<String>) {
        self.modifier = Some(modifier.into());
        self.modified_at = Some(Utc::now());
    }
}

reflect! {
    impl[ID: EntityId] for SimpleBaseEntity<ID> {
        parent: base;
        fields: [
            enabled,
            visible,
            deleted,
            creator,
            created_at,
            modifier,
            modified_at,
            deleter,
            deleted_at,
            remark,
        ];
    }
}
