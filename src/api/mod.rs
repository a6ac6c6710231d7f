pub mod coffee;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Coffee suggestions
        .route("/coffee", post(coffee::create_suggestion))
        .with_state(state)
}
