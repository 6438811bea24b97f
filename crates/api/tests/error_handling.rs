//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly; no router is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use bazaar_api::error::AppError;
use bazaar_core::error::CoreError;
use bazaar_db::store::StoreError;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Product",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Product with id 42 not found");
}

#[tokio::test]
async fn not_in_cart_returns_404_with_fixed_message() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::NotInCart { product_id: 7 })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Item not found in cart");
}

#[tokio::test]
async fn field_errors_are_included() {
    let err = AppError::Core(CoreError::invalid_field("quantity", "too small"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["quantity"][0], "too small");
}

#[tokio::test]
async fn invalid_credentials_returns_400() {
    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidCredentials)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid Credentials");
    assert!(json.get("fields").is_none());
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("nope".into()))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Conflict("duplicate name".into()))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "duplicate name");
}

#[tokio::test]
async fn unique_violation_returns_409() {
    let err = AppError::Store(StoreError::UniqueViolation {
        constraint: "uq_categories_name".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("uq_categories_name"));
}

#[tokio::test]
async fn foreign_key_violation_returns_400() {
    let err = AppError::Store(StoreError::ForeignKeyViolation {
        constraint: "fk_orders_user_id".into(),
    });

    let (status, _) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn database_error_is_sanitized() {
    let err = AppError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
