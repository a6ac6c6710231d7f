//! AWS Bedrock runtime provider (Anthropic Messages format).
//!
//! Calls `POST {base}/model/{modelId}/invoke` with a Bedrock API key sent as a
//! bearer token. Failures are classified from the `x-amzn-ErrorType` header,
//! then the body's `__type`, then the HTTP status.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    InferenceProvider, InvocationRequest, ProviderError, ProviderErrorKind, ToolDefinition,
};
use crate::infrastructure::config::Config;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

#[derive(Debug, Clone)]
pub struct BedrockProvider {
    client: reqwest::Client,
    base_url: String,
    model_id: String,
    region: String,
    token: Option<String>,
}

impl BedrockProvider {
    pub fn new(
        base_url: impl Into<String>,
        model_id: impl Into<String>,
        region: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_id: model_id.into(),
            region: region.into(),
            token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.bedrock_token.is_none() {
            tracing::warn!("AWS_BEARER_TOKEN_BEDROCK is not set; Bedrock will reject requests");
        }
        Self::new(
            config.bedrock_base_url(),
            config.model_id.clone(),
            config.region.clone(),
            config.bedrock_token.clone(),
        )
    }

    fn invoke_url(&self) -> String {
        format!(
            "{}/model/{}/invoke",
            self.base_url,
            urlencoding::encode(&self.model_id)
        )
    }
}

#[derive(Debug, Serialize)]
struct InvokeBody<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    tools: [&'a ToolDefinition; 1],
    tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    choice_type: &'static str,
    name: &'a str,
}

impl<'a> InvokeBody<'a> {
    fn from_request(request: &'a InvocationRequest) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: request.max_tokens,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
            tools: [&request.tool],
            tool_choice: ToolChoice {
                choice_type: "tool",
                name: &request.tool.name,
            },
        }
    }
}

/// Bedrock error body.
#[derive(Debug, Default, Deserialize)]
struct BedrockErrorBody {
    #[serde(alias = "Message")]
    message: Option<String>,
    #[serde(rename = "__type")]
    error_type: Option<String>,
}

/// `ValidationException:http://internal...` and
/// `com.amazon.coral.validate#ValidationException` both become
/// `ValidationException`.
fn error_type_name(raw: &str) -> &str {
    let head = raw.split(':').next().unwrap_or(raw);
    head.rsplit('#').next().unwrap_or(head).trim()
}

fn kind_from_status(status: StatusCode) -> ProviderErrorKind {
    match status {
        StatusCode::FORBIDDEN => ProviderErrorKind::AccessDenied,
        StatusCode::BAD_REQUEST => ProviderErrorKind::Validation,
        StatusCode::TOO_MANY_REQUESTS => ProviderErrorKind::Throttling,
        _ => ProviderErrorKind::Other,
    }
}

fn classify_failure(status: StatusCode, header_type: Option<&str>, body: &str) -> ProviderError {
    let parsed: BedrockErrorBody = serde_json::from_str(body).unwrap_or_default();

    let kind = header_type
        .or(parsed.error_type.as_deref())
        .map(|t| ProviderErrorKind::from_error_type(error_type_name(t)))
        .unwrap_or_else(|| kind_from_status(status));

    let message = match parsed.message {
        Some(message) => message,
        None if body.trim().is_empty() => format!("Bedrock returned {}", status),
        None => format!("Bedrock returned {}: {}", status, body.trim()),
    };

    ProviderError::new(kind, message)
}

#[async_trait]
impl InferenceProvider for BedrockProvider {
    async fn invoke(&self, request: &InvocationRequest) -> Result<Value, ProviderError> {
        let mut builder = self
            .client
            .post(self.invoke_url())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&InvokeBody::from_request(request));

        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::other(format!("Request to Bedrock failed: {}", e)))?;

        let status = response.status();
        let header_type = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::other(format!("Read body failed: {}", e)))?;

        if !status.is_success() {
            return Err(classify_failure(status, header_type.as_deref(), &body));
        }

        if body.trim().is_empty() {
            return Err(ProviderError::other("No response body from Bedrock"));
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::other(format!("Parse error for Bedrock response: {}", e)))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn region(&self) -> &str {
        &self.region
    }
}
