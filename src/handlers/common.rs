use crate::errors::ApiError;
use crate::services::history::{HistoryOutcome, Recorded};
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use utoipa::IntoParams;
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// `{"message": ...}` body with the given status
pub fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Response for a mutation that also wrote a history row.
///
/// A failed history write keeps the status of the primary write and says so
/// in the message and `history_error`.
pub fn recorded_response<T: Serialize>(
    status: StatusCode,
    entity_label: &str,
    recorded: Recorded<T>,
) -> Response {
    let body = match recorded.history {
        HistoryOutcome::Recorded(record) => json!({
            "message": format!("{} saved successfully", entity_label),
            "data": recorded.entity,
            "history": record,
        }),
        HistoryOutcome::Failed { error } => json!({
            "message": format!("{} saved successfully (history creation failed)", entity_label),
            "data": recorded.entity,
            "history_error": error,
        }),
    };
    (status, Json(body)).into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))
}

/// JSON body extractor that also runs `validator` rules.
///
/// Malformed JSON, missing fields and failed rules are all 400s carrying
/// the `{"error": ...}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        validate_input(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// Optional `?user_id=` naming the actor of a mutation; absent means 0.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActorQuery {
    #[serde(default)]
    pub user_id: i32,
}
