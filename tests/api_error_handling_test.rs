use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use coffee_greeter::api;
use coffee_greeter::domain::{ProviderError, ProviderErrorKind};
use coffee_greeter::infrastructure::{AppState, FakeProvider};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

// Helper to build the API router around a fake provider
fn setup_app(provider: Arc<FakeProvider>) -> Router {
    api::api_router_with_state(AppState::new(provider, 1000))
}

fn coffee_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .uri("/coffee")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn status_for(error: ProviderError) -> (StatusCode, Value) {
    let provider = Arc::new(
        FakeProvider::with_error(error)
            .with_model("anthropic.claude-3-haiku-20240307-v1:0", "ap-southeast-2"),
    );
    let payload = json!({ "name": "Robin" }).to_string();
    send(setup_app(provider), coffee_request(payload)).await
}

#[tokio::test]
async fn test_missing_name_is_rejected_without_upstream_call() {
    for payload in [json!({}), json!({ "name": "" }), json!({ "name": null })] {
        let provider = Arc::new(FakeProvider::new());
        let (status, body) = send(
            setup_app(provider.clone()),
            coffee_request(payload.to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Name is required" }));
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn test_invalid_json_is_a_server_error() {
    let provider = Arc::new(FakeProvider::new());
    let (status, body) = send(setup_app(provider.clone()), coffee_request("invalid json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate coffee suggestion");
    assert!(body["details"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_null_body_is_a_server_error() {
    let provider = Arc::new(FakeProvider::new());
    let (status, body) = send(setup_app(provider.clone()), coffee_request("null")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate coffee suggestion");
    assert_eq!(
        body["details"],
        "Cannot read 'name' from a null request body"
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_non_object_body_has_no_name() {
    for payload in ["[]", "42", "\"Robin\""] {
        let provider = Arc::new(FakeProvider::new());
        let (status, body) = send(setup_app(provider.clone()), coffee_request(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Name is required" }));
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn test_access_denied_maps_to_forbidden() {
    let (status, body) = status_for(ProviderError::new(
        ProviderErrorKind::AccessDenied,
        "User is not authorized",
    ))
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Access denied to AWS Bedrock. Please check your credentials and model access."
    );
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("anthropic.claude-3-haiku-20240307-v1:0"));
    assert!(details.contains("ap-southeast-2"));
}

#[tokio::test]
async fn test_validation_maps_to_bad_request_with_detail() {
    let (status, body) = status_for(ProviderError::new(
        ProviderErrorKind::Validation,
        "The provided model identifier is invalid.",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid request to AWS Bedrock. Please check the model ID and parameters."
    );
    assert_eq!(body["details"], "The provided model identifier is invalid.");
}

#[tokio::test]
async fn test_throttling_maps_to_too_many_requests() {
    let (status, body) = status_for(ProviderError::new(
        ProviderErrorKind::Throttling,
        "Too many requests, please wait before trying again.",
    ))
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body["details"],
        "Too many requests, please wait before trying again."
    );
}

#[tokio::test]
async fn test_other_failures_map_to_internal_error() {
    let (status, body) = status_for(ProviderError::other("connection reset by peer")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate coffee suggestion");
    assert_eq!(body["details"], "connection reset by peer");

    let (status, body) = status_for(ProviderError::other("")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "Unknown error occurred");
}

#[tokio::test]
async fn test_unrecognized_response_shape() {
    let provider = Arc::new(FakeProvider::with_response(json!({
        "content": [{ "type": "text", "text": "" }],
        "stop_reason": "end_turn"
    })));
    let payload = json!({ "name": "Robin" }).to_string();
    let (status, body) = send(setup_app(provider.clone()), coffee_request(payload)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate coffee suggestion");
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .starts_with("No tool call result in response")
    );
    assert_eq!(provider.call_count(), 1);
}
