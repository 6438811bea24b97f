//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::auth::TokenPair;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Letters, digits and `@ . + - _`.
fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_alphanumeric() || "@.+-_".contains(c);
    if username.trim().is_empty() || !username.trim().chars().all(allowed) {
        let mut err = ValidationError::new("username");
        err.message = Some(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .into(),
        );
        return Err(err);
    }
    Ok(())
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .auth
        .register(&input.username, &input.password, input.email.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let tokens = state.auth.login(&input.username, &input.password).await?;
    Ok(Json(tokens))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let access = state.auth.refresh(&input.refresh).await?;
    Ok(Json(AccessTokenResponse { access }))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless, so there is nothing to revoke; clients discard
/// their tokens.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out successfully",
    })
}

/// GET /api/v1/auth/profile
pub async fn profile(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let profile = state.auth.profile(user.user_id).await?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_charset() {
        assert!(validate_username("alice.b+c@d-e_f").is_ok());
        assert!(validate_username("al ice").is_err());
        assert!(validate_username("   ").is_err());
    }
}
