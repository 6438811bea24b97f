//! Handlers for the session cart. Carts are anonymous and keyed by the
//! session cookie; product ids are not checked against the catalog.

use axum::extract::State;
use axum::Json;
use bazaar_core::types::DbId;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::session::CartSession;
use crate::response::{CartResponse, MessageResponse};
use crate::state::AppState;

/// Request body for `POST /cart/add`.
///
/// Range checks happen in the cart manager so that both fields are
/// reported together.
#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    pub product_id: DbId,
    pub quantity: i64,
}

/// Request body for `POST /cart/remove`.
#[derive(Debug, Deserialize, Validate)]
pub struct RemoveFromCartRequest {
    pub product_id: DbId,
}

/// GET /api/v1/cart
pub async fn get_cart(
    State(state): State<AppState>,
    CartSession(session): CartSession,
) -> AppResult<Json<CartResponse>> {
    let cart = state.carts.get_cart(session).await?;
    Ok(Json(CartResponse {
        cart,
        message: None,
    }))
}

/// POST /api/v1/cart/add
pub async fn add_to_cart(
    State(state): State<AppState>,
    CartSession(session): CartSession,
    ValidatedJson(input): ValidatedJson<AddToCartRequest>,
) -> AppResult<Json<CartResponse>> {
    let cart = state
        .carts
        .add_item(session, input.product_id, input.quantity)
        .await?;
    tracing::debug!(%session, product_id = input.product_id, "Item added to cart");
    Ok(Json(CartResponse {
        cart,
        message: Some("Item added to cart"),
    }))
}

/// POST /api/v1/cart/remove
pub async fn remove_from_cart(
    State(state): State<AppState>,
    CartSession(session): CartSession,
    ValidatedJson(input): ValidatedJson<RemoveFromCartRequest>,
) -> AppResult<Json<CartResponse>> {
    let cart = state.carts.remove_item(session, input.product_id).await?;
    tracing::debug!(%session, product_id = input.product_id, "Item removed from cart");
    Ok(Json(CartResponse {
        cart,
        message: Some("Item removed from cart"),
    }))
}

/// POST /api/v1/cart/clear
pub async fn clear_cart(
    State(state): State<AppState>,
    CartSession(session): CartSession,
) -> AppResult<Json<MessageResponse>> {
    state.carts.clear_cart(session).await?;
    Ok(Json(MessageResponse {
        message: "Cart cleared",
    }))
}
