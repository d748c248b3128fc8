//! Response envelope configuration.

use serde::{Deserialize, Serialize};

/// Controls the response-wrapping middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Whether successful bodies are wrapped at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Only requests whose path starts with one of these prefixes are
    /// wrapped.
    #[serde(default = "default_path_prefixes")]
    pub path_prefixes: Vec<String>,
}

impl ResponseConfig {
    /// Whether a request path falls under the wrapped prefixes.
    pub fn applies_to(&self, path: &str) -> bool {
        self.enabled && self.path_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path_prefixes: default_path_prefixes(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_path_prefixes() -> Vec<String> {
    vec!["/api".to_string()]
}
