//! # crudkit-auth
//!
//! Credential helpers: Argon2id password hashing and the password
//! strength policy.

pub mod password;

pub use password::{PasswordHasher, PasswordValidator};
