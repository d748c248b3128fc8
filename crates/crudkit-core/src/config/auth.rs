//! Credential policy configuration.

use serde::{Deserialize, Serialize};

/// Password policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// How many of the four character classes (lowercase, uppercase,
    /// digit, special) a password must contain.
    #[serde(default = "default_required_classes")]
    pub password_required_classes: usize,
    /// Minimum zxcvbn strength score (0-4). `0` disables the estimate.
    #[serde(default)]
    pub password_min_score: u8,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
            password_required_classes: default_required_classes(),
            password_min_score: 0,
        }
    }
}

fn default_password_min() -> usize {
    8
}

fn default_required_classes() -> usize {
    3
}
