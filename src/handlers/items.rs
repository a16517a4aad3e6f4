use super::common::{recorded_response, success_response, ActorQuery, ValidatedJson};
use crate::{
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
    models::item,
    services::items::ItemInput,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReduceStockRequest {
    #[validate(range(min = 1))]
    pub amount: i32,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub reason: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BatchDeleteRequest {
    #[validate(length(min = 1))]
    pub ids: Vec<i32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/items",
    responses((status = 200, description = "All items", body = [item::Model])),
    tag = "items"
)]
pub async fn list_items(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.items.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item", body = item::Model),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.items.get(id).await?))
}

/// Create an item and record an `add` stock-in
#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = ItemInput,
    params(ActorQuery),
    responses(
        (status = 201, description = "Item created; history attached or history_error set"),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Query(actor): Query<ActorQuery>,
    ValidatedJson(input): ValidatedJson<ItemInput>,
) -> Result<impl IntoResponse, ApiError> {
    let recorded = state.services.items.create(input, actor.user_id).await?;
    Ok(recorded_response(StatusCode::CREATED, "Item", recorded))
}

/// Replace an item and record an `update` stock-in
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    request_body = ItemInput,
    params(("id" = i32, Path, description = "Item id"), ActorQuery),
    responses(
        (status = 200, description = "Item updated; history attached or history_error set"),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(actor): Query<ActorQuery>,
    ValidatedJson(input): ValidatedJson<ItemInput>,
) -> Result<impl IntoResponse, ApiError> {
    let recorded = state.services.items.update(id, input, actor.user_id).await?;
    Ok(recorded_response(StatusCode::OK, "Item", recorded))
}

/// Take stock out of an item and record a stock-out
#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/reduce",
    request_body = ReduceStockRequest,
    params(("id" = i32, Path, description = "Item id"), ActorQuery),
    responses(
        (status = 200, description = "Stock reduced"),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 422, description = "Not enough stock", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn reduce_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(actor): Query<ActorQuery>,
    ValidatedJson(request): ValidatedJson<ReduceStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let recorded = state
        .services
        .items
        .reduce_stock(id, request.amount, &request.reason, actor.user_id)
        .await?;
    Ok(recorded_response(StatusCode::OK, "Item", recorded))
}

#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.items.delete(id).await?;
    Ok(success_response(json!({ "message": "Item deleted successfully" })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/items/batch",
    request_body = BatchDeleteRequest,
    responses((status = 200, description = "Items deleted")),
    tag = "items"
)]
pub async fn delete_items_batch(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<BatchDeleteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.services.items.delete_many(request.ids).await?;
    Ok(success_response(json!({
        "message": "Items deleted successfully",
        "deleted": deleted,
    })))
}

pub fn item_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/batch", delete(delete_items_batch))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
        .route("/:id/reduce", post(reduce_stock))
}
