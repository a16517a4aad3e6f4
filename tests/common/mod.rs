#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use stockroom_api::{build_app, config::AppConfig, db, logging::discard_logger, AppState};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";

/// Helper harness for spinning up the full router over an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            TEST_JWT_SECRET.to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // One connection, so every query sees the same in-memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.db_idle_timeout_secs = 3600;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = build_app(state.clone(), discard_logger());

        Self { router, state }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// Create a warehouse and return its id.
    pub async fn create_warehouse(&self, code: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/warehouses",
                json!({ "code": code, "name": name, "city": "Jakarta", "capacity": 100 }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "warehouse create failed: {body}");
        body["id"].as_i64().expect("warehouse id")
    }

    /// Create an item via the API as the given user and return the full response body.
    pub async fn create_item(&self, item: Value, user_id: i32) -> Value {
        let (status, body) = self
            .post(&format!("/api/v1/items?user_id={}", user_id), item)
            .await;
        assert_eq!(status, StatusCode::CREATED, "item create failed: {body}");
        body
    }

    /// Register a user and log in, returning the bearer token.
    pub async fn login_token(&self, email: &str) -> String {
        let password = "correct-horse-battery";
        let (status, body) = self
            .post(
                "/api/v1/auth/register",
                json!({
                    "first_name": "Test",
                    "last_name": "User",
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("token").to_string()
    }
}

/// The demo item from the seed data.
pub fn gas_argon(warehouse_id: i64) -> Value {
    json!({
        "code": "M090",
        "name": "Gas Argon",
        "brand": "Samator",
        "category": "Gas Industri",
        "unit": "tabung",
        "quantity": 5,
        "price": "750000",
        "warehouse_id": warehouse_id,
    })
}
