use super::common::{created_response, success_response, ValidatedJson};
use crate::{errors::ApiError, handlers::AppState, services::companies::CompanyInput};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

pub async fn list_companies(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.companies.list().await?))
}

pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.companies.get(id).await?))
}

pub async fn create_company(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<CompanyInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(state.services.companies.create(input).await?))
}

pub async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<CompanyInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.companies.update(id, input).await?))
}

pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.companies.delete(id).await?;
    Ok(success_response(json!({ "message": "Company deleted successfully" })))
}

pub fn company_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
}
