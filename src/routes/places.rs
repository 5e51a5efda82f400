//! Place resolution endpoints.
//!
//! These are thin wrappers over the geocoder. Provider trouble never turns
//! into an error response: the client gets `[]` or `null` instead. Only
//! malformed client input is rejected.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{ActivityLocation, ActivityLocationRequest, City, Coordinates};
use crate::error::{ApiError, ApiResult};
use crate::services::location::resolve_activity_location;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct LocateParams {
    pub title: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

fn require_valid(coords: Coordinates) -> ApiResult<Coordinates> {
    if coords.is_valid() {
        Ok(coords)
    } else {
        Err(ApiError::InvalidInput(format!(
            "Coordinates out of range: lat={}, lng={}",
            coords.lat, coords.lng
        )))
    }
}

/// Search cities by name.
///
/// GET /api/places/search?q=
pub async fn search_places(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<City>>> {
    let Query(params) = params?;
    Ok(Json(state.geocoder.search(&params.q).await))
}

/// Resolve a map click to a city.
///
/// GET /api/places/reverse?lat=&lng=
pub async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ReverseParams>, QueryRejection>,
) -> ApiResult<Json<Option<City>>> {
    let Query(params) = params?;
    let point = require_valid(Coordinates::new(params.lat, params.lng))?;

    Ok(Json(state.geocoder.reverse_geocode(point.lat, point.lng).await))
}

/// Geocode a named place within a city.
///
/// GET /api/places/locate?title=&city=&lat=&lng=
pub async fn locate_place(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LocateParams>, QueryRejection>,
) -> ApiResult<Json<Option<Coordinates>>> {
    let Query(params) = params?;
    if params.title.trim().is_empty() || params.city.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Both title and city are required.".to_string(),
        ));
    }
    let center = require_valid(Coordinates::new(params.lat, params.lng))?;

    let found = state
        .geocoder
        .locate(params.title.trim(), params.city.trim(), center.lat, center.lng)
        .await;

    Ok(Json(found))
}

/// Pick a plottable point for one itinerary activity.
///
/// POST /api/activities/location
pub async fn activity_location(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActivityLocationRequest>, JsonRejection>,
) -> ApiResult<Json<ActivityLocation>> {
    let Json(req) = payload?;
    if req.activity.title.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Activity title is required.".to_string(),
        ));
    }
    require_valid(req.city.coordinates())?;

    let located =
        resolve_activity_location(state.geocoder.as_ref(), &req.activity, &req.city).await;

    Ok(Json(located))
}
