//! Place resolution over a Nominatim-compatible geocoding API.
//!
//! Geocoding is advisory, so every public method is fail-soft: transport
//! errors, bad statuses and undecodable bodies are logged and reported as
//! "no result". Internally each request returns a `LookupError` so the
//! log can tell a failed call from an empty answer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::{City, Coordinates, NominatimPlace};
use crate::services::location::within_plausibility_box;

/// Queries shorter than this (in characters) never reach the provider.
pub const MIN_QUERY_CHARS: usize = 2;

/// Zoom level for reverse lookups; 10 resolves to city granularity.
const REVERSE_ZOOM: &str = "10";

/// Place lookups used by the HTTP layer and the activity location chain.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Forward search for populated places, in provider relevance order.
    async fn search(&self, query: &str) -> Vec<City>;

    /// Nearest named place enclosing a point.
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Option<City>;

    /// Coordinates for a named place within a city, gated to stay near
    /// the city center.
    async fn locate(
        &self,
        place_title: &str,
        city_name: &str,
        city_lat: f64,
        city_lng: f64,
    ) -> Option<Coordinates>;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("geocoder request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("geocoder returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("geocoder response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client for the Nominatim HTTP API.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    search_limit: usize,
}

impl NominatimClient {
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout_seconds: u64,
        search_limit: usize,
    ) -> Result<Self> {
        // Nominatim's usage policy rejects requests without an identifying agent
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(user_agent).context("Invalid geocoder user agent")?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, "Geocoding client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            search_limit,
        })
    }

    /// Single GET against the provider.
    async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<R, LookupError> {
        let url = format!("{}{}", self.base_url, path);

        debug!(url = %url, "Geocoder request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(LookupError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        response.json::<R>().await.map_err(LookupError::Decode)
    }

    async fn try_search(&self, query: &str) -> Result<Vec<City>, LookupError> {
        let limit = self.search_limit.to_string();
        let places: Vec<NominatimPlace> = self
            .get(
                "/search",
                &[
                    ("q", query),
                    ("format", "json"),
                    ("limit", limit.as_str()),
                    ("featuretype", "city"),
                    ("addressdetails", "1"),
                    ("accept-language", "en"),
                ],
            )
            .await?;

        let total = places.len();
        let cities: Vec<City> = places
            .iter()
            .filter(|place| place.is_populated_place())
            .filter_map(|place| {
                let coords = place.coordinates()?;
                let name = place.search_name()?;
                Some(City {
                    name: name.to_string(),
                    country: place.country(),
                    lat: coords.lat,
                    lng: coords.lng,
                    display_name: place.display_name(),
                })
            })
            .take(self.search_limit)
            .collect();

        debug!(total, kept = cities.len(), "Search results filtered");

        Ok(cities)
    }

    async fn try_reverse(&self, lat: f64, lng: f64) -> Result<Option<City>, LookupError> {
        let lat_param = lat.to_string();
        let lng_param = lng.to_string();
        let place: NominatimPlace = self
            .get(
                "/reverse",
                &[
                    ("lat", lat_param.as_str()),
                    ("lon", lng_param.as_str()),
                    ("format", "json"),
                    ("zoom", REVERSE_ZOOM),
                    ("addressdetails", "1"),
                    ("accept-language", "en"),
                ],
            )
            .await?;

        Ok(place.reverse_name().map(|name| City {
            name: name.to_string(),
            country: place.country(),
            lat,
            lng,
            display_name: place.display_name(),
        }))
    }

    async fn try_locate(&self, query: &str) -> Result<Option<Coordinates>, LookupError> {
        let places: Vec<NominatimPlace> = self
            .get(
                "/search",
                &[
                    ("q", query),
                    ("format", "json"),
                    ("limit", "1"),
                    ("accept-language", "en"),
                ],
            )
            .await?;

        Ok(places.first().and_then(NominatimPlace::coordinates))
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Vec<City> {
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        match self.try_search(query.trim()).await {
            Ok(cities) => {
                if cities.is_empty() {
                    debug!("No matching places");
                }
                cities
            }
            Err(e) => {
                warn!(error = %e, "City search failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Option<City> {
        match self.try_reverse(lat, lng).await {
            Ok(Some(city)) => Some(city),
            Ok(None) => {
                debug!("Point did not resolve to a named place");
                None
            }
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed");
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn locate(
        &self,
        place_title: &str,
        city_name: &str,
        city_lat: f64,
        city_lng: f64,
    ) -> Option<Coordinates> {
        let query = format!("{place_title}, {city_name}");
        let center = Coordinates::new(city_lat, city_lng);

        match self.try_locate(&query).await {
            Ok(Some(found)) if within_plausibility_box(found, center) => Some(found),
            Ok(Some(found)) => {
                debug!(lat = found.lat, lng = found.lng, "Geocoded place is too far from the city");
                None
            }
            Ok(None) => {
                debug!("Place not found");
                None
            }
            Err(e) => {
                warn!(error = %e, "Place geocoding failed");
                None
            }
        }
    }
}
