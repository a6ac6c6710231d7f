//! Application state shared across all handlers

use std::sync::Arc;

use crate::domain::InferenceProvider;
use crate::infrastructure::bedrock::BedrockProvider;
use crate::infrastructure::config::{Config, ProviderKind};
use crate::infrastructure::fake::FakeProvider;

#[derive(Clone)]
pub struct AppState {
    /// Backend that answers coffee requests
    pub provider: Arc<dyn InferenceProvider>,
    /// Output token budget per invocation
    pub max_tokens: u32,
}

impl AppState {
    pub fn new(provider: Arc<dyn InferenceProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Create the state with the provider selected by configuration
    pub fn from_config(config: &Config) -> Self {
        let provider: Arc<dyn InferenceProvider> = match config.provider {
            ProviderKind::Bedrock => Arc::new(BedrockProvider::from_config(config)),
            ProviderKind::Fake => {
                tracing::info!("Using fake inference provider (no network calls)");
                Arc::new(FakeProvider::new())
            }
        };

        Self::new(provider, config.max_tokens)
    }
}
