//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification, and strength rules.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.

pub mod jwt;
pub mod password;
