//! Cart session cookie.
//!
//! [`cart_session`] resolves the `bazaar_session` cookie to a [`SessionId`],
//! minting a fresh one when the request has none or the value is not a valid
//! session id. Handlers read the result through the [`CartSession`]
//! extractor.
//!
//! A `Set-Cookie` goes out for new sessions and after every successful cart
//! mutation, so the cookie's `Max-Age` slides along with the stored session.

use std::str::FromStr;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use bazaar_core::types::SessionId;

use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "bazaar_session";

/// The cart session for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSession(pub SessionId);

impl<S: Send + Sync> FromRequestParts<S> for CartSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CartSession>()
            .copied()
            .ok_or_else(|| AppError::InternalError("cart session middleware not installed".into()))
    }
}

/// Find the session id in the request's `Cookie` headers.
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::from_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session.
pub fn session_cookie(session: SessionId, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={session}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Lax")
}

/// Attach a [`CartSession`] to the request, issuing a cookie for new
/// sessions and refreshing it when the cart was modified.
pub async fn cart_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let existing = session_from_headers(req.headers());
    let session = existing.unwrap_or_else(SessionId::generate);
    let mutation = req.method() == Method::POST;
    req.extensions_mut().insert(CartSession(session));

    let mut response = next.run(req).await;

    if existing.is_none() || (mutation && response.status().is_success()) {
        let cookie = session_cookie(session, state.config.cart_session_max_age_secs());
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
                tracing::debug!(%session, new = existing.is_none(), "Issued cart session cookie");
            }
            Err(e) => tracing::error!(error = %e, "Invalid session cookie header"),
        }
    }

    response
}
