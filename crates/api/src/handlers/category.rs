//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::category::{CreateCategory, UpdateCategory};

use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::query::PaginationParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let categories = state.catalog.list_categories(params.page()).await?;
    Ok(Json(categories))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = state.catalog.create_category(&input).await?;
    tracing::info!(category_id = category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = state
        .catalog
        .find_category(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = state
        .catalog
        .update_category(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(category_id = id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Also deletes every product in the category.
pub async fn delete_category(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.catalog.delete_category(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
