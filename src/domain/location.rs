//! Activity location DTOs for map plotting.

use serde::{Deserialize, Serialize};

use super::place::Coordinates;

/// Which tier of the fallback chain produced a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// The model's own coordinates passed the plausibility gate.
    Model,
    /// The geocoder found the place near the city.
    Geocoded,
    /// Nothing better was found.
    CityCenter,
}

/// A point to plot for one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLocation {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub source: LocationSource,
}

/// The activity fields the fallback chain needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRef {
    pub title: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// The reference city center.
#[derive(Debug, Clone, Deserialize)]
pub struct CityCenter {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl CityCenter {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Body of `POST /api/activities/location`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityLocationRequest {
    pub activity: ActivityRef,
    pub city: CityCenter,
}
