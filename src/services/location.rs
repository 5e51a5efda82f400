//! Choosing where to plot an activity.
//!
//! Model coordinates are trusted only inside the plausibility box around
//! the city center; otherwise the geocoder is asked, and failing that the
//! city center itself is used.

use tracing::{debug, instrument};

use crate::domain::{ActivityLocation, ActivityRef, CityCenter, Coordinates, LocationSource};
use crate::services::geocoding::Geocoder;

/// Maximum per-axis distance, in degrees, from the city center.
pub const PLAUSIBILITY_DEGREES: f64 = 1.5;

/// Per-axis box check; a point exactly on the edge is accepted.
pub fn within_plausibility_box(candidate: Coordinates, center: Coordinates) -> bool {
    (candidate.lat - center.lat).abs() <= PLAUSIBILITY_DEGREES
        && (candidate.lng - center.lng).abs() <= PLAUSIBILITY_DEGREES
}

/// Resolve a plottable point for `activity` in `city`.
#[instrument(skip(geocoder, activity, city), fields(title = %activity.title, city = %city.name))]
pub async fn resolve_activity_location(
    geocoder: &dyn Geocoder,
    activity: &ActivityRef,
    city: &CityCenter,
) -> ActivityLocation {
    let center = city.coordinates();

    let (coords, source) = match model_coordinates(activity, center) {
        Some(coords) => (coords, LocationSource::Model),
        None => match geocoder
            .locate(&activity.title, &city.name, center.lat, center.lng)
            .await
        {
            Some(coords) => (coords, LocationSource::Geocoded),
            None => (center, LocationSource::CityCenter),
        },
    };

    debug!(?source, lat = coords.lat, lng = coords.lng, "Activity location resolved");

    ActivityLocation {
        lat: coords.lat,
        lng: coords.lng,
        title: activity.title.clone(),
        emoji: activity.emoji.clone(),
        source,
    }
}

fn model_coordinates(activity: &ActivityRef, center: Coordinates) -> Option<Coordinates> {
    let coords = Coordinates::new(activity.lat?, activity.lng?);
    within_plausibility_box(coords, center).then_some(coords)
}
