use super::common::{created_response, success_response, ValidatedJson};
use crate::{
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
    services::history::{HistoryEntry, ItemAction},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

const REDUCE_ACTION: &str = "reduce";

/// Body of `POST /history/item`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ItemHistoryRequest {
    pub item_id: i32,
    /// `add`, `update` or `reduce`
    #[validate(length(min = 1))]
    pub action: String,
    #[serde(default)]
    pub user_id: i32,
    /// Only read for `reduce`
    pub reduction_amount: Option<i32>,
    /// Only read for `reduce`
    pub reason: Option<String>,
}

/// Body of `POST /history/transfer`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TransferHistoryRequest {
    pub transfer_id: i32,
    #[validate(length(min = 1))]
    pub action: String,
    #[serde(default)]
    pub user_id: i32,
}

/// List every history record, newest first
#[utoipa::path(
    get,
    path = "/api/v1/history",
    responses(
        (status = 200, description = "History records", body = [HistoryEntry]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.services.history.list_all().await?;
    Ok(success_response(entries))
}

/// Fetch one history record
#[utoipa::path(
    get,
    path = "/api/v1/history/{id}",
    params(("id" = i32, Path, description = "History record id")),
    responses(
        (status = 200, description = "History record", body = HistoryEntry),
        (status = 404, description = "History not found", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state.services.history.get(id).await?;
    Ok(success_response(entry))
}

/// Delete one history record
#[utoipa::path(
    delete,
    path = "/api/v1/history/{id}",
    params(("id" = i32, Path, description = "History record id")),
    responses(
        (status = 200, description = "History deleted"),
        (status = 404, description = "History not found", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.history.delete(id).await?;
    Ok(success_response(json!({ "message": "History deleted successfully" })))
}

/// History of one item, newest first
#[utoipa::path(
    get,
    path = "/api/v1/history/item/{item_id}",
    params(("item_id" = i32, Path, description = "Item id")),
    responses((status = 200, description = "History records", body = [HistoryEntry])),
    tag = "history"
)]
pub async fn item_history(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.services.history.list_by_item(item_id).await?;
    Ok(success_response(entries))
}

/// History of one warehouse, newest first
#[utoipa::path(
    get,
    path = "/api/v1/history/warehouse/{warehouse_id}",
    params(("warehouse_id" = i32, Path, description = "Warehouse id")),
    responses((status = 200, description = "History records", body = [HistoryEntry])),
    tag = "history"
)]
pub async fn warehouse_history(
    State(state): State<Arc<AppState>>,
    Path(warehouse_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.services.history.list_by_warehouse(warehouse_id).await?;
    Ok(success_response(entries))
}

/// Record an item event without touching the item itself
#[utoipa::path(
    post,
    path = "/api/v1/history/item",
    request_body = ItemHistoryRequest,
    responses(
        (status = 201, description = "History created"),
        (status = 400, description = "Invalid action", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "History write failed", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn create_item_history(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ItemHistoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.services.items.get(request.item_id).await?;
    let history = &state.services.history;

    let record = if request.action == REDUCE_ACTION {
        let amount = request.reduction_amount.ok_or_else(|| {
            ApiError::BadRequest("reduction_amount is required for reduce".to_string())
        })?;
        history
            .record_stock_reduction(
                &item,
                amount,
                request.reason.as_deref().unwrap_or_default(),
                request.user_id,
            )
            .await?
    } else {
        let action = ItemAction::from_str(&request.action)
            .map_err(|_| ApiError::BadRequest("Invalid action".to_string()))?;
        history
            .record_item_event(&item, action, request.user_id)
            .await?
    };

    Ok(created_response(json!({
        "message": "History created successfully",
        "data": record,
    })))
}

/// Record a transfer event for an existing transfer order
#[utoipa::path(
    post,
    path = "/api/v1/history/transfer",
    request_body = TransferHistoryRequest,
    responses(
        (status = 201, description = "Transfer history created"),
        (status = 404, description = "Transfer not found", body = ErrorResponse),
        (status = 500, description = "History write failed", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn create_transfer_history(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<TransferHistoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let transfer = state.services.transfers.get(request.transfer_id).await?;
    let record = state
        .services
        .history
        .record_transfer_event(&transfer, &request.action, request.user_id)
        .await?;

    Ok(created_response(json!({
        "message": "Transfer history created successfully",
        "data": record,
    })))
}

pub fn history_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_history))
        .route("/item", post(create_item_history))
        .route("/transfer", post(create_transfer_history))
        .route("/item/:item_id", get(item_history))
        .route("/warehouse/:warehouse_id", get(warehouse_history))
        .route("/:id", get(get_history).delete(delete_history))
}
