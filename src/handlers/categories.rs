use super::common::{created_response, success_response, ValidatedJson};
use crate::{errors::ApiError, handlers::AppState, services::categories::CategoryInput};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

pub async fn list_categories(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.categories.list().await?))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.categories.get(id).await?))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(state.services.categories.create(input).await?))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.categories.update(id, input).await?))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.categories.delete(id).await?;
    Ok(success_response(json!({ "message": "Category deleted successfully" })))
}

pub fn category_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}
