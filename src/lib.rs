//! Stockroom API Library
//!
//! Inventory and accounting backend. Item and transfer mutations append
//! stock records to a history log that can be listed per item or warehouse.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod logging;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use slog::Logger;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::auth::{AuthRouterExt, AuthService};
use crate::db::DbPool;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone(), &config);
        Self {
            db,
            config,
            services,
        }
    }
}

/// Routes mounted under `/api/v1`.
///
/// Inventory and history routes are open; user and accounting routes sit
/// behind the bearer-token middleware.
pub fn api_v1_routes(auth_service: Arc<AuthService>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .nest("/users", handlers::users::user_routes())
        .nest("/companies", handlers::companies::company_routes())
        .nest("/accounts", handlers::accounts::account_routes())
        .nest("/categories", handlers::categories::category_routes())
        .with_auth(auth_service.clone());

    Router::new()
        .nest("/history", handlers::history::history_routes())
        .nest("/items", handlers::items::item_routes())
        .nest("/warehouses", handlers::warehouses::warehouse_routes())
        .nest("/groups", handlers::groups::group_routes())
        .nest("/transfers", handlers::transfers::transfer_routes())
        .nest("/auth", auth::auth_routes().with_state(auth_service))
        .merge(protected)
}

/// CORS policy from configuration: explicit origins, permissive fallback, or same-origin only
pub fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(cfg.cors_allow_credentials)
    } else if cfg.should_allow_permissive_cors() {
        ::tracing::info!("Using permissive CORS because explicit origins were not configured");
        CorsLayer::permissive()
    } else {
        ::tracing::warn!("No CORS origins configured; cross-origin requests will be rejected");
        CorsLayer::new()
    }
}

/// Full application router: banner, health, `/api/v1`, Swagger UI and the
/// request-id, tracing, access-log and CORS layers.
pub fn build_app(state: AppState, logger: Logger) -> Router {
    let cors = cors_layer(&state.config);
    let auth_service = state.services.auth.clone();
    let db = state.db.clone();
    let logging_state = Arc::new(logging::LoggingState::new(logger));

    Router::new()
        .route("/", get(health::root))
        .nest("/api/v1", api_v1_routes(auth_service))
        .with_state(Arc::new(state))
        .nest("/health", health::health_routes(db))
        .merge(openapi::swagger_ui())
        .layer(middleware::from_fn_with_state(
            logging_state,
            logging::logging_middleware,
        ))
        .layer(tracing::configure_http_tracing())
        .layer(cors)
        .layer(middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}
