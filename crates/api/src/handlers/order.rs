//! Handlers for the `/orders` resource. Orders cannot be modified once placed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::order::CreateOrder;
use bazaar_db::store::StoreError;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::query::PaginationParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Order", id })
}

/// GET /api/v1/orders
///
/// Newest orders first.
pub async fn list_orders(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let orders = state.orders.list_orders(params.page()).await?;
    Ok(Json(orders))
}

/// POST /api/v1/orders
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> AppResult<impl IntoResponse> {
    let order = match state.orders.create_order(&input).await {
        Ok(order) => order,
        Err(StoreError::ForeignKeyViolation { .. }) => {
            return Err(CoreError::invalid_field(
                "user_id",
                format!("Invalid pk \"{}\" - object does not exist.", input.user_id),
            )
            .into())
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(order_id = order.id, user_id = order.user_id, "Order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = state
        .orders
        .find_order(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(order))
}

/// DELETE /api/v1/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.orders.delete_order(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(order_id = id, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}
