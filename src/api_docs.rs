use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::api;
use crate::domain::CoffeeSuggestion;

#[derive(OpenApi)]
#[openapi(
    paths(api::health::health_check, api::coffee::create_suggestion),
    components(schemas(CoffeeSuggestion, api::coffee::CoffeeRequest, api::coffee::ErrorBody)),
    tags(
        (name = "coffee-greeter", description = "Coffee Greeter API")
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document at `/api-docs/openapi.json`.
pub fn docs_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
