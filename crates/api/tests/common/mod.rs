#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use bazaar_api::auth::jwt::JwtConfig;
use bazaar_api::config::{ServerConfig, StoreBackend};
use bazaar_api::router::{build_app_router, App};
use bazaar_api::state::AppState;
use bazaar_db::models::product::Product;
use bazaar_db::store::MemoryStore;
use bazaar_events::ProductHook;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        cart_session_ttl_days: 14,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 5,
            refresh_token_expiry_days: 1,
        },
    }
}

/// Records the products the hook was called with.
#[derive(Default)]
pub struct RecordingHook {
    pub created: Mutex<Vec<Product>>,
}

impl ProductHook for RecordingHook {
    fn on_product_created(&self, product: &Product) {
        self.created.lock().unwrap().push(product.clone());
    }
}

/// Full application backed by a fresh in-memory store.
pub struct TestApp {
    pub app: App,
    pub hook: Arc<RecordingHook>,
}

impl TestApp {
    pub fn new() -> Self {
        let hook = Arc::new(RecordingHook::default());
        let state = AppState::new(test_config(), Arc::new(MemoryStore::new()), hook.clone());
        Self {
            app: build_app_router(state),
            hook,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(request(Method::GET, uri, None, &[])).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.send(request(Method::DELETE, uri, None, &[])).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        self.send(request(Method::POST, uri, Some(body), &[])).await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> Response {
        self.send(request(Method::PUT, uri, Some(body), &[])).await
    }

    pub async fn get_auth(&self, uri: &str, token: &str) -> Response {
        let bearer = format!("Bearer {token}");
        self.send(request(
            Method::GET,
            uri,
            None,
            &[(AUTHORIZATION.as_str(), bearer.as_str())],
        ))
        .await
    }

    /// POST JSON carrying a session cookie value (`bazaar_session=...`).
    pub async fn post_json_cookie(
        &self,
        uri: &str,
        body: serde_json::Value,
        cookie: &str,
    ) -> Response {
        self.send(request(
            Method::POST,
            uri,
            Some(body),
            &[(COOKIE.as_str(), cookie)],
        ))
        .await
    }

    pub async fn get_cookie(&self, uri: &str, cookie: &str) -> Response {
        self.send(request(Method::GET, uri, None, &[(COOKIE.as_str(), cookie)]))
            .await
    }

    /// Register a user and return the response body.
    pub async fn register(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .post_json(
                "/api/v1/auth/register/",
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    /// Log in and return `{refresh, access}`.
    pub async fn login(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .post_json(
                "/api/v1/auth/login/",
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    /// Create a category and return its id.
    pub async fn create_category(&self, name: &str) -> i64 {
        let response = self
            .post_json("/api/v1/categories/", serde_json::json!({ "name": name }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    /// Create a product in `category_id` and return its id.
    pub async fn create_product(&self, category_id: i64, name: &str) -> i64 {
        let response = self
            .post_json(
                "/api/v1/products/",
                serde_json::json!({
                    "name": name,
                    "description": "Test product",
                    "price": "19.99",
                    "category_id": category_id,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }
}

pub fn request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    headers: &[(&str, &str)],
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `name=value` pair of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("bazaar_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
