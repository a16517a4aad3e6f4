use super::common::{created_response, message_response, success_response, ValidatedJson};
use crate::{
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
    models::{item, item_group},
    services::groups::GroupInput,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddGroupItemRequest {
    pub item_id: i32,
}

#[utoipa::path(
    get,
    path = "/api/v1/groups",
    responses((status = 200, description = "All item groups", body = [item_group::Model])),
    tag = "groups"
)]
pub async fn list_groups(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.groups.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/groups/{id}",
    params(("id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Item group", body = item_group::Model),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    tag = "groups"
)]
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.groups.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/groups",
    request_body = GroupInput,
    responses((status = 201, description = "Group created", body = item_group::Model)),
    tag = "groups"
)]
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<GroupInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(state.services.groups.create(input).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/groups/{id}",
    request_body = GroupInput,
    params(("id" = i32, Path, description = "Group id")),
    responses((status = 200, description = "Group updated", body = item_group::Model)),
    tag = "groups"
)]
pub async fn update_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<GroupInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.groups.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/groups/{id}",
    params(("id" = i32, Path, description = "Group id")),
    responses((status = 200, description = "Group and its memberships deleted")),
    tag = "groups"
)]
pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.groups.delete(id).await?;
    Ok(success_response(json!({ "message": "Group deleted successfully" })))
}

#[utoipa::path(
    get,
    path = "/api/v1/groups/{id}/items",
    params(("id" = i32, Path, description = "Group id")),
    responses((status = 200, description = "Items in the group", body = [item::Model])),
    tag = "groups"
)]
pub async fn list_group_items(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<item::Model>>, ApiError> {
    Ok(Json(state.services.groups.items(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/groups/{id}/items",
    request_body = AddGroupItemRequest,
    params(("id" = i32, Path, description = "Group id")),
    responses(
        (status = 201, description = "Item is a member of the group"),
        (status = 404, description = "Group or item not found", body = ErrorResponse)
    ),
    tag = "groups"
)]
pub async fn add_group_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<AddGroupItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.groups.add_item(id, request.item_id).await?;
    Ok(message_response(
        StatusCode::CREATED,
        "Item added to group successfully",
    ))
}

pub fn group_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_groups).post(create_group))
        .route(
            "/:id",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route("/:id/items", get(list_group_items).post(add_group_item))
}
