//! Application state shared across handlers and middleware.

use std::sync::Arc;

use crudkit_auth::PasswordValidator;
use crudkit_core::config::AppConfig;

/// State for the application-level routes.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Password policy.
    pub password_validator: Arc<PasswordValidator>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        Self {
            config: Arc::new(config),
            password_validator,
        }
    }
}
