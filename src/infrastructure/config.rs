use std::env;

pub const DEFAULT_REGION: &str = "ap-southeast-2";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_PORT: u16 = 8000;

/// Which inference backend handles requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    Bedrock,
    /// Canned answers, no network.
    Fake,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub provider: ProviderKind,
    pub region: String,
    pub model_id: String,
    pub max_tokens: u32,
    /// Overrides the regional Bedrock runtime URL.
    pub bedrock_endpoint: Option<String>,
    pub bedrock_token: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    /// Server used by the `--submit` client mode.
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match var("INFERENCE_PROVIDER").as_deref() {
            Some("fake") => ProviderKind::Fake,
            Some("bedrock") | None => ProviderKind::Bedrock,
            Some(other) => {
                tracing::warn!("Unknown INFERENCE_PROVIDER '{}', using bedrock", other);
                ProviderKind::Bedrock
            }
        };

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            provider,
            region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            model_id: var("BEDROCK_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            max_tokens: var("BEDROCK_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_TOKENS),
            bedrock_endpoint: var("BEDROCK_ENDPOINT"),
            bedrock_token: var("AWS_BEARER_TOKEN_BEDROCK"),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
            api_url: var("COFFEE_API_URL").unwrap_or_else(|| format!("http://127.0.0.1:{}", port)),
        }
    }

    /// The Bedrock runtime base URL for the configured region.
    pub fn bedrock_base_url(&self) -> String {
        self.bedrock_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://bedrock-runtime.{}.amazonaws.com", self.region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.port, 8000);
        assert_eq!(config.provider, ProviderKind::Bedrock);
        assert_eq!(config.region, "ap-southeast-2");
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.max_tokens, 1000);
        assert!(config.bedrock_token.is_none());
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.api_url, "http://127.0.0.1:8000");
        assert_eq!(
            config.bedrock_base_url(),
            "https://bedrock-runtime.ap-southeast-2.amazonaws.com"
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("AWS_REGION", "us-east-1"),
            ("INFERENCE_PROVIDER", "fake"),
            ("BEDROCK_MAX_TOKENS", "512"),
            ("BEDROCK_ENDPOINT", "http://localhost:4566"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test"),
        ]);

        assert_eq!(config.port, 9100);
        assert_eq!(config.provider, ProviderKind::Fake);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.bedrock_base_url(), "http://localhost:4566");
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.api_url, "http://127.0.0.1:9100");
    }

    #[test]
    fn test_blank_region_falls_back_to_default() {
        let config = config_from(&[("AWS_REGION", "  "), ("PORT", "not-a-port")]);
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
