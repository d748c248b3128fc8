//! Generic repository configuration.

use serde::{Deserialize, Serialize};

use crate::types::{IdentityStrategy, MatchPolicy};

/// Behaviour switches for the generic query-by-example repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Which example fields become predicates.
    #[serde(default)]
    pub match_policy: MatchPolicy,
    /// How new entities obtain their identity.
    #[serde(default)]
    pub identity_strategy: IdentityStrategy,
    /// Upper bound applied to page sizes requested over HTTP.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            identity_strategy: IdentityStrategy::default(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_max_page_size() -> u64 {
    500
}
