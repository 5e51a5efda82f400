use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::GenerateItineraryRequest;
use crate::error::ApiResult;
use crate::middleware::request_id::request_id;

/// Generate an itinerary for a city.
///
/// POST /api/itinerary
pub async fn generate_itinerary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<GenerateItineraryRequest>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Json(req) = payload?;

    tracing::info!(
        request_id = request_id(&headers),
        city = req.name.as_deref().unwrap_or_default(),
        "Itinerary requested"
    );

    let itinerary = state.itineraries.generate(&req).await?;

    Ok(Json(itinerary))
}
