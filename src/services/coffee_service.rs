//! Coffee Service - prompt and tool construction, one model call, and
//! reshaping of the answer into a [`CoffeeSuggestion`].

use serde_json::json;

use crate::domain::{
    CoffeeError, CoffeeSuggestion, InferenceProvider, InvocationRequest, ToolDefinition,
    extract_candidate, normalize,
};

pub const TOOL_NAME: &str = "morning_coffee_greeting";

/// Natural-language instruction for the model.
pub fn build_prompt(name: &str) -> String {
    format!(
        "You are a coffee expert and morning person. Generate a personalized morning greeting and coffee suggestion for {name}.

Please use the tool call to provide:
1. A warm, personalized morning greeting
2. A specific coffee type recommendation (e.g., \"Ethiopian Yirgacheffe pour-over\", \"Dark roast espresso\", \"Light roast cold brew\")
3. Clear reasoning for why this coffee is perfect for them
4. An interesting health fact related to coffee or the suggested type
5. A confidence score between 0 and 1 for your recommendation

Make it personal, warm, and informative."
    )
}

/// The structured-output tool with the six required record fields.
pub fn coffee_tool() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: "Send a personalized morning greeting with a coffee suggestion and related health fact.".to_string(),
        input_schema: json!({
            "type": "object",
            "required": [
                "name",
                "greeting",
                "suggestedCoffee",
                "reasoning",
                "healthFact",
                "confidence_score"
            ],
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the person to greet."
                },
                "greeting": {
                    "type": "string",
                    "description": "Personalized morning greeting message."
                },
                "suggestedCoffee": {
                    "type": "string",
                    "description": "The type of coffee suggested."
                },
                "reasoning": {
                    "type": "string",
                    "description": "Reasoning behind the coffee suggestion."
                },
                "healthFact": {
                    "type": "string",
                    "description": "A health fact related to the suggested coffee."
                },
                "confidence_score": {
                    "type": "number",
                    "description": "Confidence score of the suggested pairing, between 0 and 1."
                }
            }
        }),
    }
}

pub fn build_invocation(name: &str, max_tokens: u32) -> InvocationRequest {
    InvocationRequest {
        prompt: build_prompt(name),
        max_tokens,
        tool: coffee_tool(),
    }
}

/// Ask the model for a suggestion for `name`.
///
/// Empty names are rejected before any provider call. The provider is
/// invoked exactly once; its answer is always normalized, even when the
/// call succeeded, because the tool schema is not enforced upstream.
pub async fn suggest_coffee(
    provider: &dyn InferenceProvider,
    max_tokens: u32,
    name: &str,
) -> Result<CoffeeSuggestion, CoffeeError> {
    if name.is_empty() {
        return Err(CoffeeError::MissingInput);
    }

    tracing::info!(
        "Requesting coffee suggestion - model={}, region={}",
        provider.model_id(),
        provider.region()
    );

    let raw = provider
        .invoke(&build_invocation(name, max_tokens))
        .await
        .map_err(|e| {
            tracing::error!("Error calling inference provider: {}", e);
            CoffeeError::from_provider(e, provider.model_id(), provider.region())
        })?;

    tracing::debug!("Full response body: {}", raw);

    let Some(candidate) = extract_candidate(&raw) else {
        tracing::error!("No tool call result in response. Response structure: {}", raw);
        return Err(CoffeeError::UpstreamShapeMismatch);
    };

    tracing::debug!("Structured answer found via {:?}", candidate.shape);

    Ok(normalize(candidate.value, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_name() {
        let prompt = build_prompt("Marguerite");
        assert!(prompt.contains("coffee suggestion for Marguerite."));
        assert!(prompt.contains("confidence score between 0 and 1"));
    }

    #[test]
    fn test_tool_requires_all_record_fields() {
        let tool = coffee_tool();
        assert_eq!(tool.name, TOOL_NAME);

        let required: Vec<&str> = tool.input_schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(
            required,
            [
                "name",
                "greeting",
                "suggestedCoffee",
                "reasoning",
                "healthFact",
                "confidence_score"
            ]
        );

        for field in &required {
            assert!(tool.input_schema["properties"][field]["description"].is_string());
        }
        assert_eq!(
            tool.input_schema["properties"]["confidence_score"]["type"],
            "number"
        );
    }
}
