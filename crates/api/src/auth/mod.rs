//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification for staff accounts.
//! - [`jwt`] -- JWT access-token and report-token generation and validation.

pub mod jwt;
pub mod password;
