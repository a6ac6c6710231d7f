//! Client-side submitter for `POST /api/coffee`.
//!
//! Tracks the outcome of the most recent submission as a
//! [`SubmissionState`]. Every submission takes a sequence number; an outcome
//! that arrives after a newer submission has started is dropped.

use serde_json::{Value, json};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{CoffeeSuggestion, normalize};

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const INVALID_DATA_ERROR: &str = "Invalid data structure received from API";
pub const GENERIC_FAILURE: &str = "Failed to generate coffee suggestion";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded(CoffeeSuggestion),
    Failed {
        message: String,
        details: Option<String>,
    },
}

impl SubmissionState {
    fn failed(message: impl Into<String>, details: Option<String>) -> Self {
        SubmissionState::Failed {
            message: message.into(),
            details,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    pub fn result(&self) -> Option<&CoffeeSuggestion> {
        match self {
            SubmissionState::Succeeded(suggestion) => Some(suggestion),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn error_details(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Tracker {
    latest: u64,
    state: SubmissionState,
}

#[derive(Debug)]
pub struct Submitter {
    client: reqwest::Client,
    endpoint: String,
    tracker: Mutex<Tracker>,
}

impl Submitter {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/coffee", base_url.trim_end_matches('/')),
            tracker: Mutex::new(Tracker::default()),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.tracker().state.clone()
    }

    /// Submit a name and wait for the outcome.
    ///
    /// The name is trimmed; a blank name is not sent and leaves the state
    /// untouched. Returns the state after this submission settles, which
    /// may belong to a newer submission.
    pub async fn submit(&self, name: &str) -> SubmissionState {
        let name = name.trim();
        if name.is_empty() {
            return self.state();
        }

        let seq = self.begin();
        let outcome = self.request(name).await;
        self.settle(seq, outcome)
    }

    fn tracker(&self) -> MutexGuard<'_, Tracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> u64 {
        let mut tracker = self.tracker();
        tracker.latest += 1;
        tracker.state = SubmissionState::Pending;
        tracker.latest
    }

    fn settle(&self, seq: u64, outcome: SubmissionState) -> SubmissionState {
        let mut tracker = self.tracker();
        if seq == tracker.latest {
            tracker.state = outcome;
        } else {
            tracing::debug!(
                "Discarding stale response for submission {} (latest is {})",
                seq,
                tracker.latest
            );
        }
        tracker.state.clone()
    }

    async fn request(&self, name: &str) -> SubmissionState {
        let response = match self
            .client
            .post(&self.endpoint)
            .json(&json!({ "name": name }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Coffee request failed: {}", e);
                return SubmissionState::failed(UNEXPECTED_ERROR, None);
            }
        };

        let status = response.status();
        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Coffee response was not JSON (status {}): {}", status, e);
                return SubmissionState::failed(UNEXPECTED_ERROR, None);
            }
        };

        tracing::debug!("API response {}: {}", status, data);

        if !status.is_success() {
            return error_state(&data);
        }

        if !data.is_object() {
            return SubmissionState::failed(INVALID_DATA_ERROR, None);
        }

        SubmissionState::Succeeded(normalize(&data, name))
    }
}

/// State for an error body `{ "error", "details"? }`.
///
/// Details come from the body, or failing that from the error message
/// itself when it is a JSON document carrying a `details` field.
fn error_state(data: &Value) -> SubmissionState {
    let message = data
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or(GENERIC_FAILURE);

    let details = data
        .get("details")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            serde_json::from_str::<Value>(message)
                .ok()?
                .get("details")?
                .as_str()
                .map(str::to_string)
        });

    SubmissionState::failed(message, details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_state_uses_body_details() {
        let state = error_state(&json!({ "error": "Denied", "details": "check region" }));
        assert_eq!(state.error(), Some("Denied"));
        assert_eq!(state.error_details(), Some("check region"));
        assert!(!state.is_loading());
        assert!(state.result().is_none());
    }

    #[test]
    fn test_error_state_parses_json_message() {
        let state = error_state(&json!({ "error": "{\"details\":\"nested\"}" }));
        assert_eq!(state.error_details(), Some("nested"));

        let state = error_state(&json!({ "error": "plain text" }));
        assert_eq!(state.error(), Some("plain text"));
        assert_eq!(state.error_details(), None);
    }

    #[test]
    fn test_error_state_without_error_field() {
        let state = error_state(&json!({}));
        assert_eq!(state.error(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let submitter = Submitter::new("http://127.0.0.1:1");
        let first = submitter.begin();
        let second = submitter.begin();

        let fresh = SubmissionState::Succeeded(CoffeeSuggestion::fallback("second"));
        assert_eq!(submitter.settle(second, fresh.clone()), fresh);

        let stale = SubmissionState::failed("late", None);
        assert_eq!(submitter.settle(first, stale), fresh);
        assert_eq!(submitter.state(), fresh);
    }

    #[test]
    fn test_pending_while_outstanding() {
        let submitter = Submitter::new("http://127.0.0.1:1/");
        assert_eq!(submitter.state(), SubmissionState::Idle);

        submitter.begin();
        assert!(submitter.state().is_loading());
        assert_eq!(submitter.endpoint, "http://127.0.0.1:1/api/coffee");
    }
}
