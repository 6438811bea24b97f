//! Identity operations behind the `/auth` routes.
//!
//! There is no logout here. Tokens are stateless and expire on their own.

use std::sync::{Arc, LazyLock};

use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::user::{CreateUser, UserProfile};
use bazaar_db::store::{CredentialStore, StoreError};
use serde::Serialize;

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, validate_token, Claims, JwtConfig, TokenType,
};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

/// Hash verified against when the username is unknown, so a login for a
/// missing user costs the same Argon2 work as a wrong password.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("bazaar-dummy-password").expect("argon2 hashing with default params")
});

/// Tokens issued on a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Registers users, checks passwords, and issues and checks tokens.
#[derive(Clone)]
pub struct AuthGateway {
    credentials: Arc<dyn CredentialStore>,
    jwt: Arc<JwtConfig>,
}

impl AuthGateway {
    pub fn new(credentials: Arc<dyn CredentialStore>, jwt: JwtConfig) -> Self {
        LazyLock::force(&DUMMY_HASH);
        Self {
            credentials,
            jwt: Arc::new(jwt),
        }
    }

    /// Create a user. The password is hashed before it reaches the store.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> AppResult<UserProfile> {
        let username = username.trim();
        if self
            .credentials
            .find_user_by_username(username)
            .await?
            .is_some()
        {
            return Err(username_taken());
        }

        let password_hash = hash_password(password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

        let input = CreateUser {
            username: username.to_string(),
            email: email.map(str::to_string),
            password_hash,
        };
        // A concurrent registration can still win the race to the constraint.
        let user = match self.credentials.create_user(&input).await {
            Ok(user) => user,
            Err(StoreError::UniqueViolation { .. }) => return Err(username_taken()),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(UserProfile::from(&user))
    }

    /// Exchange a username and password for a token pair.
    ///
    /// An unknown username and a wrong password fail identically.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let Some(user) = self.credentials.find_user_by_username(username).await? else {
            verify_dummy(password);
            tracing::debug!(username, "Login for unknown username");
            return Err(CoreError::InvalidCredentials.into());
        };

        let password_valid = verify_password(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !password_valid {
            tracing::debug!(user_id = user.id, "Login with wrong password");
            return Err(CoreError::InvalidCredentials.into());
        }

        let refresh = generate_refresh_token(user.id, &self.jwt).map_err(token_error)?;
        let access = generate_access_token(user.id, &self.jwt).map_err(token_error)?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(TokenPair { refresh, access })
    }

    /// Issue a new access token for a valid refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.decode(refresh_token, TokenType::Refresh)?;
        generate_access_token(claims.sub, &self.jwt).map_err(token_error)
    }

    /// Resolve an access token to the user id it was issued for.
    pub fn authenticate(&self, access_token: &str) -> AppResult<DbId> {
        Ok(self.decode(access_token, TokenType::Access)?.sub)
    }

    /// Profile of the user behind an authenticated request.
    pub async fn profile(&self, user_id: DbId) -> AppResult<UserProfile> {
        let user = self
            .credentials
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(invalid_token)?;
        Ok(UserProfile::from(&user))
    }

    fn decode(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let claims = validate_token(token, &self.jwt).map_err(|_| invalid_token())?;
        if claims.token_type != expected {
            return Err(invalid_token());
        }
        Ok(claims)
    }
}

/// Run a full verification against [`DUMMY_HASH`]. The outcome is discarded.
fn verify_dummy(password: &str) -> bool {
    verify_password(password, &DUMMY_HASH).unwrap_or(false)
}

fn username_taken() -> AppError {
    CoreError::Conflict("A user with that username already exists.".into()).into()
}

fn invalid_token() -> AppError {
    CoreError::Unauthorized("Invalid or expired token".into()).into()
}

fn token_error(e: jsonwebtoken::errors::Error) -> AppError {
    AppError::InternalError(format!("Token generation error: {e}"))
}
