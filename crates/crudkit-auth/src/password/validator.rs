//! Password policy enforcement for new passwords.

use std::fmt;

use tracing::debug;

use crudkit_core::config::AuthConfig;
use crudkit_core::error::AppError;

/// The four character classes a password is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        Self::Lowercase,
        Self::Uppercase,
        Self::Digit,
        Self::Special,
    ];

    /// Whether `password` contains a character of this class.
    pub fn present_in(self, password: &str) -> bool {
        password.chars().any(|c| match self {
            Self::Lowercase => c.is_ascii_lowercase(),
            Self::Uppercase => c.is_ascii_uppercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::Special => !c.is_ascii_alphanumeric(),
        })
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lowercase => "lowercase letter",
            Self::Uppercase => "uppercase letter",
            Self::Digit => "digit",
            Self::Special => "special character",
        })
    }
}

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    required_classes: usize,
    min_score: Option<zxcvbn::Score>,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let min_score = match config.password_min_score {
            0 => None,
            1 => Some(zxcvbn::Score::One),
            2 => Some(zxcvbn::Score::Two),
            3 => Some(zxcvbn::Score::Three),
            _ => Some(zxcvbn::Score::Four),
        };
        Self {
            min_length: config.password_min_length,
            required_classes: config.password_required_classes.min(CharacterClass::ALL.len()),
            min_score,
        }
    }

    /// Character classes `password` lacks.
    pub fn missing_classes(password: &str) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| !class.present_in(password))
            .collect()
    }

    /// Whether `password` has at least the required number of classes.
    pub fn is_strong(&self, password: &str) -> bool {
        CharacterClass::ALL.len() - Self::missing_classes(password).len() >= self.required_classes
    }

    /// Describe why `password` fails the length and class rules, or `None`
    /// when it passes them.
    pub fn strength_message(&self, password: &str) -> Option<String> {
        if password.is_empty() {
            return Some("Password must not be empty".to_string());
        }
        if password.chars().count() < self.min_length {
            return Some(format!(
                "Password must be at least {} characters long",
                self.min_length
            ));
        }
        if self.is_strong(password) {
            return None;
        }
        let missing: Vec<String> = Self::missing_classes(password)
            .iter()
            .map(ToString::to_string)
            .collect();
        Some(format!(
            "Password must contain at least {} character types; missing: {}",
            self.required_classes,
            missing.join(", ")
        ))
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns the first violation as a validation error.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if let Some(message) = self.strength_message(password) {
            return Err(AppError::validation(message));
        }

        if let Some(min_score) = self.min_score {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if estimate.score() < min_score {
                debug!(score = ?estimate.score(), "Password below strength floor");
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password with more entropy.",
                ));
            }
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, old_password: &str, new_password: &str) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}
