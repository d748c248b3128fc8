//! Field- and struct-level validation helpers for use with `validator`.
//!
//! Both helpers treat a missing value as valid; presence is the job of a
//! `required`/`length` rule.

pub mod date_range;
pub mod id_card;

pub use date_range::DateRange;
pub use id_card::validate_id_card;
