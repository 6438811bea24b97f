//! Route definitions for the `/orders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// No PUT: orders are immutable once placed.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::list_orders).post(order::create_order))
        .route("/{id}", get(order::get_order).delete(order::delete_order))
}
