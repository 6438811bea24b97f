//! Bazaar domain core.
//!
//! Shared identifier types, the [`error::CoreError`] taxonomy, request
//! validation helpers, and the session-scoped [`cart`] manager.

pub mod cart;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
