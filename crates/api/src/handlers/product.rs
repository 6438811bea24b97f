//! Handlers for the `/products` resource.
//!
//! A product's `category_id` must name an existing category; a dangling id
//! is reported as a field error on `category_id` rather than a 404.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::product::{CreateProduct, UpdateProduct};
use bazaar_db::store::StoreError;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::query::ProductListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// Report a foreign key failure as a field error on `category_id`.
fn unknown_category(err: StoreError, category_id: Option<DbId>) -> AppError {
    match (err, category_id) {
        (StoreError::ForeignKeyViolation { .. }, Some(category_id)) => CoreError::invalid_field(
            "category_id",
            format!("Invalid pk \"{category_id}\" - object does not exist."),
        )
        .into(),
        (err, _) => err.into(),
    }
}

/// GET /api/v1/products
///
/// Supports `?category_id=` in addition to pagination.
pub async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let products = state
        .catalog
        .list_products(&params.filter(), params.page())
        .await?;
    Ok(Json(products))
}

/// POST /api/v1/products
///
/// Fires the product-created hook once the row is stored.
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    let product = state
        .catalog
        .create_product(&input)
        .await
        .map_err(|e| unknown_category(e, Some(input.category_id)))?;
    tracing::info!(
        product_id = product.id,
        category_id = product.category_id,
        "Product created"
    );
    state.product_hook.on_product_created(&product);

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = state
        .catalog
        .find_product(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// PUT /api/v1/products/{id}
///
/// Fields left out of the body keep their current values.
pub async fn update_product(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    let product = state
        .catalog
        .update_product(id, &input)
        .await
        .map_err(|e| unknown_category(e, input.category_id))?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(product_id = id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.catalog.delete_product(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
