use super::common::{created_response, success_response, ValidatedJson};
use crate::{
    auth::AuthUser,
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
    models::user,
    services::users::{NewUser, UserUpdate},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use serde_json::json;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users", body = [user::Model]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.users.list().await?))
}

/// The user the bearer token was issued to
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses((status = 200, description = "Current user", body = user::Model)),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.users.get(auth.user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = user::Model),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.users.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = user::Model),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(state.services.users.create(input).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    request_body = UserUpdate,
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "User updated", body = user::Model)),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<UserUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.users.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "User deleted")),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.users.delete(id).await?;
    Ok(success_response(json!({ "message": "User deleted successfully" })))
}

pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(current_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}
