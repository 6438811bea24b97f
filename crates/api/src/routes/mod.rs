pub mod auth;
pub mod cart;
pub mod category;
pub mod health;
pub mod order;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                 list, create
/// /categories/{id}            get, update, delete (cascades to products)
///
/// /products                   list (?category_id=), create
/// /products/{id}              get, update, delete
///
/// /orders                     list, create
/// /orders/{id}                get, delete
///
/// /cart                       get (session cookie)
/// /cart/add                   add item
/// /cart/remove                remove item
/// /cart/clear                 clear
///
/// /auth/register              register
/// /auth/login                 login
/// /auth/refresh               new access token
/// /auth/logout                logout
/// /auth/profile               current user (Bearer token)
/// ```
///
/// Every path also answers with a trailing slash; see
/// [`build_app_router`](crate::router::build_app_router).
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/products", product::router())
        .nest("/orders", order::router())
        .nest("/cart", cart::router(state))
        .nest("/auth", auth::router())
}
