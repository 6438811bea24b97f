//! Route definitions for the `/cart` resource.

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::handlers::cart;
use crate::middleware::session::cart_session;
use crate::state::AppState;

/// Routes mounted at `/cart`, all behind the session cookie middleware.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(cart::get_cart))
        .route("/add", post(cart::add_to_cart))
        .route("/remove", post(cart::remove_from_cart))
        .route("/clear", post(cart::clear_cart))
        .route_layer(middleware::from_fn_with_state(state.clone(), cart_session))
}
