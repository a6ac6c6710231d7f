//! Fake inference provider for tests and offline runs.
//!
//! Returns a scripted response (or error) without touching the network. It
//! counts invocations and keeps only the most recent request, so it is safe
//! to run as a long-lived offline backend.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{InferenceProvider, InvocationRequest, ProviderError};
use crate::services::coffee_service::TOOL_NAME;

#[derive(Debug)]
pub struct FakeProvider {
    reply: Option<Result<Value, ProviderError>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<InvocationRequest>>,
    model_id: String,
    region: String,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            model_id: "fake-model".to_string(),
            region: "local".to_string(),
        }
    }
}

impl FakeProvider {
    /// Provider that answers with a well-formed tool_use block echoing the prompt's name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that always returns `response` as the raw body.
    pub fn with_response(response: Value) -> Self {
        Self {
            reply: Some(Ok(response)),
            ..Self::default()
        }
    }

    /// Provider that always fails with `error`.
    pub fn with_error(error: ProviderError) -> Self {
        Self {
            reply: Some(Err(error)),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model_id: &str, region: &str) -> Self {
        self.model_id = model_id.to_string();
        self.region = region.to_string();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<InvocationRequest> {
        self.last_request.lock().ok().and_then(|last| last.clone())
    }

    fn canned_answer(request: &InvocationRequest) -> Value {
        let name = request
            .prompt
            .split("coffee suggestion for ")
            .nth(1)
            .and_then(|rest| rest.split(".\n").next())
            .unwrap_or("friend");

        json!({
            "id": "msg_fake",
            "type": "message",
            "role": "assistant",
            "content": [{
                "type": "tool_use",
                "id": "toolu_fake",
                "name": TOOL_NAME,
                "input": {
                    "name": name,
                    "greeting": format!("Good morning, {}! Ready to take on the day?", name),
                    "suggestedCoffee": "Medium roast flat white",
                    "reasoning": "A balanced cup that is smooth enough for an easy start.",
                    "healthFact": "Moderate coffee intake is associated with a lower risk of type 2 diabetes.",
                    "confidence_score": 0.85
                }
            }],
            "stop_reason": "tool_use"
        })
    }
}

#[async_trait]
impl InferenceProvider for FakeProvider {
    async fn invoke(&self, request: &InvocationRequest) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.reply {
            Some(reply) => reply.clone(),
            None => Ok(Self::canned_answer(request)),
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn region(&self) -> &str {
        &self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::build_invocation;

    #[tokio::test]
    async fn test_canned_answer_echoes_name() {
        let provider = FakeProvider::new();
        let raw = provider.invoke(&build_invocation("Noor", 100)).await.unwrap();

        assert_eq!(raw["content"][0]["input"]["name"], "Noor");
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_request().unwrap().max_tokens, 100);
    }

    #[tokio::test]
    async fn test_repeated_calls_keep_only_latest_request() {
        let provider = FakeProvider::new();
        for i in 0..500u32 {
            provider
                .invoke(&build_invocation(&format!("Guest{}", i), i + 1))
                .await
                .unwrap();
        }

        assert_eq!(provider.call_count(), 500);
        let last = provider.last_request().unwrap();
        assert_eq!(last.max_tokens, 500);
        assert!(last.prompt.contains("Guest499"));
    }
}
