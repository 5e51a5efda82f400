//! Itinerary generation: input checks, mock or live mode, extraction.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use crate::domain::GenerateItineraryRequest;
use crate::error::ApiError;
use crate::services::extraction::{extract_itinerary, SchemaPolicy};
use crate::services::llm_client::CompletionProvider;
use crate::services::mock_data::mock_itinerary;
use crate::services::prompts::build_itinerary_prompt;

/// Operating mode, fixed at startup.
#[derive(Clone)]
pub enum GenerationMode {
    /// Serve the canned itinerary after a simulated delay.
    Mock { delay: Duration },
    /// Ask the language model.
    Live(Arc<dyn CompletionProvider>),
}

impl GenerationMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mock { .. } => "mock",
            Self::Live(_) => "live",
        }
    }
}

#[derive(Clone)]
pub struct ItineraryService {
    mode: GenerationMode,
    schema_policy: SchemaPolicy,
}

/// Trimmed, non-empty `(name, country)` or `InvalidInput`.
fn validate_request(request: &GenerateItineraryRequest) -> Result<(&str, &str), ApiError> {
    let name = request.name.as_deref().map(str::trim).unwrap_or_default();
    let country = request.country.as_deref().map(str::trim).unwrap_or_default();

    if name.is_empty() || country.is_empty() {
        return Err(ApiError::InvalidInput(
            "Invalid city. Provide both name and country.".to_string(),
        ));
    }

    Ok((name, country))
}

impl ItineraryService {
    pub fn new(mode: GenerationMode, schema_policy: SchemaPolicy) -> Self {
        Self {
            mode,
            schema_policy,
        }
    }

    pub fn mode(&self) -> &GenerationMode {
        &self.mode
    }

    /// Generate an itinerary for the requested city.
    ///
    /// Returns the itinerary as JSON: the canned record in mock mode, the
    /// extracted model value in live mode.
    #[instrument(skip(self, request), fields(mode = self.mode.label()))]
    pub async fn generate(
        &self,
        request: &GenerateItineraryRequest,
    ) -> Result<serde_json::Value, ApiError> {
        let (name, country) = validate_request(request)?;

        match &self.mode {
            GenerationMode::Mock { delay } => {
                info!(city = %name, "Serving mock itinerary");
                tokio::time::sleep(*delay).await;
                let itinerary = serde_json::to_value(mock_itinerary(name, country))
                    .map_err(anyhow::Error::from)?;
                Ok(itinerary)
            }
            GenerationMode::Live(provider) => {
                info!(city = %name, country = %country, "Generating itinerary");
                let prompt = build_itinerary_prompt(name, country);
                let text = provider.complete(&prompt).await?;
                let itinerary = extract_itinerary(&text, self.schema_policy)?;
                info!(
                    city = %name,
                    highlights = itinerary["highlights"].as_array().map_or(0, Vec::len),
                    "Itinerary generated"
                );
                Ok(itinerary)
            }
        }
    }
}
