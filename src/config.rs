use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::services::SchemaPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Itinerary generation
    pub use_mock_data: bool,
    pub mock_delay: Duration,
    pub schema_policy: SchemaPolicy,

    // Language model provider
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_max_tokens: u32,
    pub openai_timeout_seconds: u64,

    // Geocoding provider
    pub nominatim_base_url: String,
    pub nominatim_user_agent: String,
    pub nominatim_timeout_seconds: u64,
    pub search_result_limit: usize,
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn validate_base_url(name: &str, value: String) -> Result<String> {
    Url::parse(&value).with_context(|| format!("{name} is not a valid URL: {value}"))?;
    Ok(value.trim_end_matches('/').to_string())
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env = Environment::from_str(&var("ENV").unwrap_or_else(|| "dev".to_string()));
        let server_addr = var("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Itinerary generation
        let use_mock_data = var("USE_MOCK_DATA")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let mock_delay = Duration::from_millis(parse_or(var("MOCK_DELAY_MS"), 1500));
        let schema_policy = match var("SCHEMA_POLICY") {
            Some(raw) => raw
                .parse::<SchemaPolicy>()
                .map_err(anyhow::Error::msg)
                .context("SCHEMA_POLICY is invalid")?,
            None => SchemaPolicy::Lenient,
        };

        // Language model provider
        let openai_api_key = var("OPENAI_API_KEY");
        if !use_mock_data && openai_api_key.is_none() {
            bail!("OPENAI_API_KEY must be set unless USE_MOCK_DATA=true");
        }
        let openai_base_url = validate_base_url(
            "OPENAI_BASE_URL",
            var("OPENAI_BASE_URL").unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        )?;
        let openai_model = var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string());
        let openai_max_tokens = parse_or(var("OPENAI_MAX_TOKENS"), 4096);
        let openai_timeout_seconds = parse_or(var("OPENAI_TIMEOUT_SECONDS"), 120); // 2 minutes for LLM calls

        // Geocoding provider
        let nominatim_base_url = validate_base_url(
            "NOMINATIM_BASE_URL",
            var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|| "https://nominatim.openstreetmap.org".to_string()),
        )?;
        let nominatim_user_agent =
            var("NOMINATIM_USER_AGENT").unwrap_or_else(|| "Itinerai/1.0".to_string());
        let nominatim_timeout_seconds = parse_or(var("NOMINATIM_TIMEOUT_SECONDS"), 10);
        let search_result_limit = parse_or(var("SEARCH_RESULT_LIMIT"), 6).max(1);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            use_mock_data,
            mock_delay,
            schema_policy,
            openai_api_key,
            openai_base_url,
            openai_model,
            openai_max_tokens,
            openai_timeout_seconds,
            nominatim_base_url,
            nominatim_user_agent,
            nominatim_timeout_seconds,
            search_result_limit,
        })
    }
}
