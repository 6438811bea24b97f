use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bazaar_core::error::{CoreError, FieldErrors};
use bazaar_db::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures, and renders both as `{ "error": ..., "code": ... }` JSON.
/// Field-level validation failures add a `"fields"` object.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields: Option<FieldErrors> = None;

        let (status, code, message) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::NotInCart { .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Item not found in cart".to_string(),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
                CoreError::InvalidFields(errors) => {
                    fields = Some(errors);
                    (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        "Validation failed".to_string(),
                    )
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::InvalidCredentials => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_CREDENTIALS",
                    "Invalid Credentials".to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    tracing::debug!(reason = %msg, "Rejected unauthenticated request");
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            AppError::Store(err) => classify_store_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Classify a storage error into an HTTP status, error code, and message.
///
/// - Unique constraint violations map to 409.
/// - Foreign key violations map to 400; the referenced row does not exist.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::UniqueViolation { constraint } => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        StoreError::ForeignKeyViolation { constraint } => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Referenced record does not exist ({constraint})"),
        ),
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
    }
}
