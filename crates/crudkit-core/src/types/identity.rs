//! Identity assignment strategy selection.

use serde::{Deserialize, Serialize};

/// How a persistence context assigns identities to entities it saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStrategy {
    /// Always generate a fresh identity on first persistence.
    AlwaysGenerate,
    /// Keep an identity the caller already assigned; generate only when it
    /// is absent or blank.
    #[default]
    ReuseIfPresent,
}
