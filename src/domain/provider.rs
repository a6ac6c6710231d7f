//! Inference provider abstraction.
//!
//! The coffee service talks to the hosted model only through
//! [`InferenceProvider`], so tests and offline runs can swap in a fake.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A structured-output tool the model is forced to call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// One model invocation: a single user prompt plus the pinned tool.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub tool: ToolDefinition,
}

/// Provider-side failure classes, taken from the provider's error discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    AccessDenied,
    Validation,
    Throttling,
    Other,
}

impl ProviderErrorKind {
    /// Map an AWS error type name (e.g. `ThrottlingException`) to a kind.
    pub fn from_error_type(error_type: &str) -> Self {
        match error_type {
            "AccessDeniedException" => ProviderErrorKind::AccessDenied,
            "ValidationException" => ProviderErrorKind::Validation,
            "ThrottlingException" => ProviderErrorKind::Throttling,
            _ => ProviderErrorKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ProviderError {}

#[async_trait]
pub trait InferenceProvider: Send + Sync + fmt::Debug {
    /// Invoke the model once and return the decoded response body.
    async fn invoke(&self, request: &InvocationRequest) -> Result<Value, ProviderError>;

    /// Model identifier sent with each invocation.
    fn model_id(&self) -> &str;

    /// Region the provider is configured for.
    fn region(&self) -> &str;
}
