/*!
 * # Health Check Module
 *
 * Liveness and readiness endpoints for load balancers and operators:
 *
 * - Root banner (`/`) - the API is reachable
 * - Basic health check (`/health`) - process is up
 * - Readiness check (`/health/ready`) - database answers a ping
 * - Version (`/health/version`) - build information
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Health check detail
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthDetail {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Overall health information
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub details: HashMap<String, HealthDetail>,
}

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub db_pool: Arc<DatabaseConnection>,
    pub health_cache: Arc<RwLock<HealthInfo>>,
    pub start_time: SystemTime,
}

impl HealthState {
    pub fn new(db_pool: Arc<DatabaseConnection>) -> Self {
        Self {
            db_pool,
            health_cache: Arc::new(RwLock::new(HealthInfo {
                status: HealthStatus::Up,
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                uptime_seconds: 0,
                details: HashMap::new(),
            })),
            start_time: SystemTime::now(),
        }
    }

    /// Calculate system uptime
    pub fn uptime(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or(Duration::from_secs(0))
            .as_secs()
    }

    /// Ping the database and refresh the cached status
    pub async fn update_health(&self) {
        let database = match crate::db::check_connection(&self.db_pool).await {
            Ok(()) => HealthDetail {
                status: HealthStatus::Up,
                message: None,
                timestamp: Utc::now(),
            },
            Err(e) => {
                error!("Database health check failed: {}", e);
                HealthDetail {
                    status: HealthStatus::Down,
                    message: Some(e.to_string()),
                    timestamp: Utc::now(),
                }
            }
        };

        let mut health = self.health_cache.write().await;
        health.timestamp = Utc::now();
        health.uptime_seconds = self.uptime();
        health.status = database.status.clone();
        health.details.insert("database".to_string(), database);
    }
}

/// `GET /` banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Stockroom API is running",
        "status": "ok",
    }))
}

/// Returns build and version information
pub async fn version_info() -> impl IntoResponse {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "commit": option_env!("GIT_HASH").unwrap_or("unknown"),
    }))
}

/// Basic health check endpoint
pub async fn health_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    debug!("Health check endpoint called");

    (
        StatusCode::OK,
        Json(json!({
            "status": HealthStatus::Up,
            "version": env!("CARGO_PKG_VERSION"),
            "uptime_seconds": state.uptime(),
            "timestamp": Utc::now(),
        })),
    )
}

/// Readiness check endpoint
pub async fn readiness_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    state.update_health().await;
    let health = state.health_cache.read().await;

    let status_code = match health.status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(json!({
            "ready": health.status == HealthStatus::Up,
            "details": health.details,
            "timestamp": health.timestamp,
        })),
    )
}

/// Creates router with health check endpoints, to be nested under `/health`
pub fn health_routes(db_pool: Arc<DatabaseConnection>) -> Router {
    let health_state = Arc::new(HealthState::new(db_pool));

    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/version", get(version_info))
        .with_state(health_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn disconnected_database_is_not_ready() {
        let app = health_routes(Arc::new(DatabaseConnection::Disconnected));

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ready"], false);
        assert_eq!(json["details"]["database"]["status"], "down");
    }

    #[tokio::test]
    async fn liveness_does_not_touch_the_database() {
        let app = health_routes(Arc::new(DatabaseConnection::Disconnected));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
