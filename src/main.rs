mod app;
mod config;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;

use anyhow::{Context, Result};
use std::sync::Arc;

use services::{GenerationMode, ItineraryService, LlmClient, NominatimClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    // Generation mode is fixed for the life of the process
    let mode = if settings.use_mock_data {
        GenerationMode::Mock {
            delay: settings.mock_delay,
        }
    } else {
        let api_key = settings
            .openai_api_key
            .as_deref()
            .context("OPENAI_API_KEY must be set in live mode")?;
        let client = LlmClient::new(
            &settings.openai_base_url,
            api_key,
            &settings.openai_model,
            settings.openai_max_tokens,
            settings.openai_timeout_seconds,
        )?;
        GenerationMode::Live(Arc::new(client))
    };
    let itineraries = ItineraryService::new(mode, settings.schema_policy);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        generation_mode = itineraries.mode().label(),
        schema_policy = %settings.schema_policy,
        "Starting Itinerai backend"
    );

    // Create geocoding client
    let geocoder = NominatimClient::new(
        &settings.nominatim_base_url,
        &settings.nominatim_user_agent,
        settings.nominatim_timeout_seconds,
        settings.search_result_limit,
    )?;

    // Create application state
    let state = app::AppState::new(settings.clone(), itineraries, Arc::new(geocoder));

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server_addr))?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
