//! Request DTOs.

use serde::{Deserialize, Serialize};

use crudkit_core::types::PageRequest;

/// Paged query-by-example listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery<T> {
    /// Probe entity; absent means "match everything".
    pub example: Option<T>,
    #[serde(flatten)]
    pub page: PageRequest,
}

/// Unpaged query-by-example listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery<T> {
    pub example: Option<T>,
    #[serde(default)]
    pub sort_field: Option<String>,
}

/// Count by example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountQuery<T> {
    pub example: Option<T>,
}

/// Soft-delete a batch of ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest<Id> {
    pub ids: Vec<Id>,
    /// Recorded as the deleter; defaults to `"system"`.
    #[serde(default = "default_deleter")]
    pub deleter: String,
}

fn default_deleter() -> String {
    "system".to_string()
}

/// Password to score against the policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordCheckRequest {
    pub password: String,
}
