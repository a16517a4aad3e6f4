use super::common::{created_response, success_response, ValidatedJson};
use crate::{
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
    models::warehouse,
    services::warehouses::WarehouseInput,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/warehouses",
    responses((status = 200, description = "All warehouses", body = [warehouse::Model])),
    tag = "warehouses"
)]
pub async fn list_warehouses(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.warehouses.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse id")),
    responses(
        (status = 200, description = "Warehouse", body = warehouse::Model),
        (status = 404, description = "Warehouse not found", body = ErrorResponse)
    ),
    tag = "warehouses"
)]
pub async fn get_warehouse(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.warehouses.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/warehouses",
    request_body = WarehouseInput,
    responses((status = 201, description = "Warehouse created", body = warehouse::Model)),
    tag = "warehouses"
)]
pub async fn create_warehouse(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<WarehouseInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(state.services.warehouses.create(input).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/warehouses/{id}",
    request_body = WarehouseInput,
    params(("id" = i32, Path, description = "Warehouse id")),
    responses((status = 200, description = "Warehouse updated", body = warehouse::Model)),
    tag = "warehouses"
)]
pub async fn update_warehouse(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<WarehouseInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.warehouses.update(id, input).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse id")),
    responses((status = 200, description = "Warehouse deleted")),
    tag = "warehouses"
)]
pub async fn delete_warehouse(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.warehouses.delete(id).await?;
    Ok(success_response(json!({ "message": "Warehouse deleted successfully" })))
}

pub fn warehouse_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/:id",
            get(get_warehouse)
                .put(update_warehouse)
                .delete(delete_warehouse),
        )
}
