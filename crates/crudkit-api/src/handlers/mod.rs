//! HTTP handlers.

pub mod crud;
pub mod health;
pub mod password;
