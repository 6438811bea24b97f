use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Default lifetime of a cart session, in days.
pub const DEFAULT_CART_SESSION_TTL_DAYS: i64 = 14;

/// Where catalog, order, user and cart data is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process memory. Data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub store_backend: StoreBackend,
    /// Idle lifetime of a cart session; also the cookie `Max-Age`.
    pub cart_session_ttl_days: i64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `STORE_BACKEND`         | `postgres`              |
    /// | `CART_SESSION_TTL_DAYS` | `14`                    |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values, and if `JWT_SECRET` is missing.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_backend = std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("STORE_BACKEND: {e}"));

        let cart_session_ttl_days: i64 = std::env::var("CART_SESSION_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_CART_SESSION_TTL_DAYS.to_string())
            .parse()
            .expect("CART_SESSION_TTL_DAYS must be a valid i64");
        assert!(
            cart_session_ttl_days > 0,
            "CART_SESSION_TTL_DAYS must be positive"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            cart_session_ttl_days,
            jwt: JwtConfig::from_env(),
        }
    }

    /// Cart session lifetime in seconds, as used for the cookie `Max-Age`.
    pub fn cart_session_max_age_secs(&self) -> i64 {
        self.cart_session_ttl_days * 24 * 60 * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_backend() {
        assert_eq!(
            "postgres".parse::<StoreBackend>(),
            Ok(StoreBackend::Postgres)
        );
        assert_eq!(" Memory ".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("redis".parse::<StoreBackend>().is_err());
    }
}
