//! Domain error types
//!
//! Framework-agnostic failures of a coffee suggestion request. The API layer
//! turns these into HTTP responses.

use std::fmt;

use super::provider::{ProviderError, ProviderErrorKind};

pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error occurred";

#[derive(Debug)]
pub enum CoffeeError {
    /// The request carried no usable name
    MissingInput,
    /// Provider refused access to the model
    UpstreamAuthDenied { model: String, region: String },
    /// Provider rejected the request parameters
    UpstreamValidation(String),
    /// Provider is rate limiting
    UpstreamThrottled(String),
    /// No structured answer in any recognized response shape
    UpstreamShapeMismatch,
    /// Network, decoding or unclassified provider failure
    UpstreamUnknown(Option<String>),
}

impl CoffeeError {
    /// Classify a provider failure.
    pub fn from_provider(err: ProviderError, model: &str, region: &str) -> Self {
        match err.kind {
            ProviderErrorKind::AccessDenied => CoffeeError::UpstreamAuthDenied {
                model: model.to_string(),
                region: region.to_string(),
            },
            ProviderErrorKind::Validation => CoffeeError::UpstreamValidation(err.message),
            ProviderErrorKind::Throttling => CoffeeError::UpstreamThrottled(err.message),
            ProviderErrorKind::Other if err.message.is_empty() => {
                CoffeeError::UpstreamUnknown(None)
            }
            ProviderErrorKind::Other => CoffeeError::UpstreamUnknown(Some(err.message)),
        }
    }

    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            CoffeeError::MissingInput => "Name is required",
            CoffeeError::UpstreamAuthDenied { .. } => {
                "Access denied to AWS Bedrock. Please check your credentials and model access."
            }
            CoffeeError::UpstreamValidation(_) => {
                "Invalid request to AWS Bedrock. Please check the model ID and parameters."
            }
            CoffeeError::UpstreamThrottled(_) => {
                "AWS Bedrock is currently throttling requests. Please try again later."
            }
            CoffeeError::UpstreamShapeMismatch | CoffeeError::UpstreamUnknown(_) => {
                "Failed to generate coffee suggestion"
            }
        }
    }

    /// Secondary detail shown under the message, if any.
    pub fn details(&self) -> Option<String> {
        match self {
            CoffeeError::MissingInput => None,
            CoffeeError::UpstreamAuthDenied { model, region } => Some(format!(
                "Make sure you have access to {} in your AWS Bedrock console in the {} region.",
                model, region
            )),
            CoffeeError::UpstreamValidation(detail) | CoffeeError::UpstreamThrottled(detail) => {
                Some(detail.clone())
            }
            CoffeeError::UpstreamShapeMismatch => Some(
                "No tool call result in response. Response structure may be different than expected."
                    .to_string(),
            ),
            CoffeeError::UpstreamUnknown(detail) => Some(
                detail
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_ERROR_DETAIL.to_string()),
            ),
        }
    }
}

impl fmt::Display for CoffeeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.details() {
            Some(details) => write!(f, "{} ({})", self.message(), details),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for CoffeeError {}
