//! Authentication primitives and the auth gateway.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed access and refresh tokens.
//! - [`gateway`] -- register, login, refresh, and profile lookup.

pub mod gateway;
pub mod jwt;
pub mod password;

pub use gateway::{AuthGateway, TokenPair};
