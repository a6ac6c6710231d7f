use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{CoffeeError, CoffeeSuggestion};
use crate::infrastructure::AppState;
use crate::services::suggest_coffee;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CoffeeRequest {
    pub name: String,
}

/// Error payload for every non-2xx response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CoffeeError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoffeeError::MissingInput | CoffeeError::UpstreamValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            CoffeeError::UpstreamAuthDenied { .. } => StatusCode::FORBIDDEN,
            CoffeeError::UpstreamThrottled(_) => StatusCode::TOO_MANY_REQUESTS,
            CoffeeError::UpstreamShapeMismatch | CoffeeError::UpstreamUnknown(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CoffeeError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
            details: self.details(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// The name from a request body, or "" when absent or not a string.
///
/// A body that is not JSON, or is JSON `null`, has no fields to read and
/// is a server-side failure rather than a missing name.
fn requested_name(body: &Bytes) -> Result<String, CoffeeError> {
    let payload: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Invalid JSON in coffee request: {}", e);
        CoffeeError::UpstreamUnknown(Some(e.to_string()))
    })?;

    if payload.is_null() {
        tracing::warn!("Coffee request body is null");
        return Err(CoffeeError::UpstreamUnknown(Some(
            "Cannot read 'name' from a null request body".to_string(),
        )));
    }

    Ok(payload
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

#[utoipa::path(
    post,
    path = "/api/coffee",
    request_body = CoffeeRequest,
    responses(
        (status = 200, description = "Personalized coffee suggestion", body = CoffeeSuggestion),
        (status = 400, description = "Missing name or rejected upstream request", body = ErrorBody),
        (status = 403, description = "Access to the model was denied", body = ErrorBody),
        (status = 429, description = "Upstream is throttling", body = ErrorBody),
        (status = 500, description = "Any other failure", body = ErrorBody)
    )
)]
pub async fn create_suggestion(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CoffeeSuggestion>, CoffeeError> {
    let name = requested_name(&body)?;

    let suggestion = suggest_coffee(state.provider.as_ref(), state.max_tokens, &name)
        .await
        .inspect_err(|e| tracing::warn!("Coffee request failed: {}", e))?;

    Ok(Json(suggestion))
}
