use super::common::{recorded_response, success_response, ActorQuery, ValidatedJson};
use crate::{
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
    models::transfer_order,
    services::transfers::TransferInput,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use serde_json::json;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/transfers",
    responses((status = 200, description = "All transfer orders", body = [transfer_order::Model])),
    tag = "transfers"
)]
pub async fn list_transfers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.transfers.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/transfers/{id}",
    params(("id" = i32, Path, description = "Transfer id")),
    responses(
        (status = 200, description = "Transfer order", body = transfer_order::Model),
        (status = 404, description = "Transfer not found", body = ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.transfers.get(id).await?))
}

/// Create a transfer order and record it
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = TransferInput,
    params(ActorQuery),
    responses(
        (status = 201, description = "Transfer created; history attached or history_error set"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Item or warehouse not found", body = ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Query(actor): Query<ActorQuery>,
    ValidatedJson(input): ValidatedJson<TransferInput>,
) -> Result<impl IntoResponse, ApiError> {
    let recorded = state.services.transfers.create(input, actor.user_id).await?;
    Ok(recorded_response(StatusCode::CREATED, "Transfer", recorded))
}

#[utoipa::path(
    put,
    path = "/api/v1/transfers/{id}",
    request_body = TransferInput,
    params(("id" = i32, Path, description = "Transfer id"), ActorQuery),
    responses((status = 200, description = "Transfer updated")),
    tag = "transfers"
)]
pub async fn update_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(actor): Query<ActorQuery>,
    ValidatedJson(input): ValidatedJson<TransferInput>,
) -> Result<impl IntoResponse, ApiError> {
    let recorded = state
        .services
        .transfers
        .update(id, input, actor.user_id)
        .await?;
    Ok(recorded_response(StatusCode::OK, "Transfer", recorded))
}

#[utoipa::path(
    put,
    path = "/api/v1/transfers/{id}/approve",
    params(("id" = i32, Path, description = "Transfer id"), ActorQuery),
    responses((status = 200, description = "Transfer approved")),
    tag = "transfers"
)]
pub async fn approve_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(actor): Query<ActorQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let recorded = state.services.transfers.approve(id, actor.user_id).await?;
    Ok(recorded_response(StatusCode::OK, "Transfer", recorded))
}

#[utoipa::path(
    put,
    path = "/api/v1/transfers/{id}/complete",
    params(("id" = i32, Path, description = "Transfer id"), ActorQuery),
    responses((status = 200, description = "Transfer completed")),
    tag = "transfers"
)]
pub async fn complete_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(actor): Query<ActorQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let recorded = state.services.transfers.complete(id, actor.user_id).await?;
    Ok(recorded_response(StatusCode::OK, "Transfer", recorded))
}

#[utoipa::path(
    delete,
    path = "/api/v1/transfers/{id}",
    params(("id" = i32, Path, description = "Transfer id")),
    responses((status = 200, description = "Transfer deleted")),
    tag = "transfers"
)]
pub async fn delete_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.transfers.delete(id).await?;
    Ok(success_response(json!({ "message": "Transfer deleted successfully" })))
}

pub fn transfer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_transfers).post(create_transfer))
        .route(
            "/:id",
            get(get_transfer).put(update_transfer).delete(delete_transfer),
        )
        .route("/:id/approve", put(approve_transfer))
        .route("/:id/complete", put(complete_transfer))
}
