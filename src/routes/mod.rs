pub mod health;
pub mod itinerary;
pub mod places;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Itinerary generation
        .route("/api/itinerary", post(itinerary::generate_itinerary))
        // Place resolution
        .route("/api/places/search", get(places::search_places))
        .route("/api/places/reverse", get(places::reverse_geocode))
        .route("/api/places/locate", get(places::locate_place))
        .route("/api/activities/location", post(places::activity_location))
}
