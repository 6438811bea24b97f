//! Request extraction with validation.
//!
//! Wrappers around axum's `Json`, `Path` and `Query` extractors whose
//! rejections are [`AppError`]s, so malformed input gets the same JSON
//! error body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use bazaar_core::error::CoreError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and passed its `validator` rules.
///
/// Malformed bodies and failed rules both surface as 400 `VALIDATION_ERROR`
/// responses instead of axum's plain-text rejections.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::Validation(rejection.body_text()))?;
        value.validate().map_err(CoreError::from)?;
        Ok(Self(value))
    }
}

/// Path parameters, rejected with 400 `VALIDATION_ERROR` when a segment does
/// not parse (e.g. a non-numeric or out-of-range id).
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CoreError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string parameters, rejected with 400 `VALIDATION_ERROR` when they
/// do not deserialize.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CoreError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
