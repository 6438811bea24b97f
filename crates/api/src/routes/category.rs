//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/{id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
}
