//! Route definitions for the `/products` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/{id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
}
