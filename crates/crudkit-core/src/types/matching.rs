//! Query-by-example matching policy.

use serde::{Deserialize, Serialize};

/// Decides which fields of an example object become equality predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Every declared field is constrained, including fields still holding
    /// their default value (`NULL`, `0`, `""`, `false`).
    #[default]
    MatchAllFields,
    /// Fields holding their default value are left out of the query.
    MatchNonDefaultFields,
}
