use super::common::{created_response, success_response, ValidatedJson};
use crate::{errors::ApiError, handlers::AppState, services::accounts::AccountInput};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

pub async fn list_accounts(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.accounts.list().await?))
}

pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.accounts.get(id).await?))
}

pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<AccountInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(state.services.accounts.create(input).await?))
}

pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<AccountInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.accounts.update(id, input).await?))
}

pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.accounts.delete(id).await?;
    Ok(success_response(json!({ "message": "Account deleted successfully" })))
}

pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route(
            "/:id",
            get(get_account).put(update_account).delete(delete_account),
        )
}
