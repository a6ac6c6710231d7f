//! The coffee suggestion record and the normalization that guarantees
//! every field is present and correctly typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const DEFAULT_GREETING: &str = "Good morning!";
pub const DEFAULT_SUGGESTED_COFFEE: &str = "Classic coffee";
pub const DEFAULT_REASONING: &str = "A great choice for any morning";
pub const DEFAULT_HEALTH_FACT: &str = "Coffee is generally good for you in moderation";
pub const DEFAULT_CONFIDENCE_SCORE: f64 = 0.8;

/// A personalized coffee suggestion, as returned by `POST /api/coffee`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CoffeeSuggestion {
    pub name: String,
    pub greeting: String,
    #[serde(rename = "suggestedCoffee")]
    pub suggested_coffee: String,
    pub reasoning: String,
    #[serde(rename = "healthFact")]
    pub health_fact: String,
    /// Intended to be in [0, 1]; not clamped.
    pub confidence_score: f64,
}

impl CoffeeSuggestion {
    /// The record used when nothing usable came back.
    pub fn fallback(name: &str) -> Self {
        Self {
            name: name.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            suggested_coffee: DEFAULT_SUGGESTED_COFFEE.to_string(),
            reasoning: DEFAULT_REASONING.to_string(),
            health_fact: DEFAULT_HEALTH_FACT.to_string(),
            confidence_score: DEFAULT_CONFIDENCE_SCORE,
        }
    }

    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.confidence_score)
    }
}

/// Build a complete record from whatever the model produced.
///
/// Each field is copied only when the key exists with the expected JSON
/// type (string, or number for `confidence_score`); anything else gets its
/// default. A candidate that is not an object yields the full fallback
/// record. Shared by the server handler and the client submitter.
pub fn normalize(candidate: &Value, fallback_name: &str) -> CoffeeSuggestion {
    let Some(fields) = candidate.as_object() else {
        return CoffeeSuggestion::fallback(fallback_name);
    };

    let text = |key: &str, default: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    CoffeeSuggestion {
        name: text("name", fallback_name),
        greeting: text("greeting", DEFAULT_GREETING),
        suggested_coffee: text("suggestedCoffee", DEFAULT_SUGGESTED_COFFEE),
        reasoning: text("reasoning", DEFAULT_REASONING),
        health_fact: text("healthFact", DEFAULT_HEALTH_FACT),
        confidence_score: fields
            .get("confidence_score")
            .and_then(Value::as_f64)
            .unwrap_or(DEFAULT_CONFIDENCE_SCORE),
    }
}

/// Display band for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    Excellent,
    Good,
    ConsiderAlternatives,
}

impl ConfidenceTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ConfidenceTier::Excellent
        } else if score >= 0.6 {
            ConfidenceTier::Good
        } else {
            ConfidenceTier::ConsiderAlternatives
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::Excellent => "Excellent recommendation!",
            ConfidenceTier::Good => "Good suggestion",
            ConfidenceTier::ConsiderAlternatives => "Consider alternatives",
        }
    }
}
