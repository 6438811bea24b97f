//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- the user behind a JWT Bearer token.
//! - [`session::CartSession`] -- the cart session named by the session cookie.

pub mod auth;
pub mod session;
