//! Place models: resolved cities, coordinates, and the Nominatim wire format.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both axes are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A resolved place, produced by the geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

// =============================================================================
// Nominatim wire types
// =============================================================================

/// A single result from Nominatim `/search` or `/reverse`.
///
/// Nominatim encodes coordinates as strings, and `/reverse` answers
/// unresolvable points with `{"error": "..."}`, so every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimPlace {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Result types accepted by forward search.
const POPULATED_PLACE_TYPES: [&str; 4] = ["city", "town", "village", "administrative"];

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl NominatimPlace {
    /// Whether the result is classified as a populated place.
    pub fn is_populated_place(&self) -> bool {
        let type_matches = self
            .place_type
            .as_deref()
            .is_some_and(|t| POPULATED_PLACE_TYPES.contains(&t));

        type_matches || self.class.as_deref() == Some("place")
    }

    /// Parsed coordinates, if both parse and lie within range.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let lat = self.lat.as_deref()?.trim().parse::<f64>().ok()?;
        let lng = self.lon.as_deref()?.trim().parse::<f64>().ok()?;
        let coords = Coordinates::new(lat, lng);
        coords.is_valid().then_some(coords)
    }

    /// Name for a forward-search hit: city, town, village, then `name`.
    pub fn search_name(&self) -> Option<&str> {
        let address = self.address.as_ref();
        address
            .and_then(|a| non_empty(&a.city))
            .or_else(|| address.and_then(|a| non_empty(&a.town)))
            .or_else(|| address.and_then(|a| non_empty(&a.village)))
            .or_else(|| non_empty(&self.name))
    }

    /// Name for a reverse lookup: city, town, village, county, then `name`.
    pub fn reverse_name(&self) -> Option<&str> {
        let address = self.address.as_ref();
        address
            .and_then(|a| non_empty(&a.city))
            .or_else(|| address.and_then(|a| non_empty(&a.town)))
            .or_else(|| address.and_then(|a| non_empty(&a.village)))
            .or_else(|| address.and_then(|a| non_empty(&a.county)))
            .or_else(|| non_empty(&self.name))
    }

    pub fn country(&self) -> String {
        self.address
            .as_ref()
            .and_then(|a| a.country.clone())
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(json: serde_json::Value) -> NominatimPlace {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn populated_place_by_type_or_class() {
        assert!(place(serde_json::json!({"type": "town", "class": "boundary"})).is_populated_place());
        assert!(place(serde_json::json!({"type": "hamlet", "class": "place"})).is_populated_place());
        assert!(!place(serde_json::json!({"type": "museum", "class": "tourism"})).is_populated_place());
        assert!(!place(serde_json::json!({})).is_populated_place());
    }

    #[test]
    fn reverse_name_prefers_finer_granularity() {
        let p = place(serde_json::json!({
            "name": "Generic",
            "address": {"town": "Royal Leamington Spa", "county": "Warwickshire"}
        }));
        assert_eq!(p.reverse_name(), Some("Royal Leamington Spa"));

        let p = place(serde_json::json!({
            "name": "Generic",
            "address": {"city": "", "county": "Warwickshire"}
        }));
        assert_eq!(p.reverse_name(), Some("Warwickshire"));

        let p = place(serde_json::json!({"error": "Unable to geocode"}));
        assert_eq!(p.reverse_name(), None);
    }

    #[test]
    fn search_name_skips_county() {
        let p = place(serde_json::json!({
            "name": "Greater Lisbon",
            "address": {"county": "Lisboa"}
        }));
        assert_eq!(p.search_name(), Some("Greater Lisbon"));
    }

    #[test]
    fn coordinates_reject_garbage_and_out_of_range() {
        let ok = place(serde_json::json!({"lat": "48.8566", "lon": "2.3522"}));
        assert_eq!(ok.coordinates(), Some(Coordinates::new(48.8566, 2.3522)));

        let bad = place(serde_json::json!({"lat": "north", "lon": "2.3"}));
        assert_eq!(bad.coordinates(), None);

        let out = place(serde_json::json!({"lat": "91.0", "lon": "2.3"}));
        assert_eq!(out.coordinates(), None);
    }

    #[test]
    fn city_serializes_camel_case() {
        let city = City {
            name: "Paris".into(),
            country: "France".into(),
            lat: 48.8566,
            lng: 2.3522,
            display_name: "Paris, Ile-de-France, France".into(),
        };
        let value = serde_json::to_value(&city).unwrap();
        assert_eq!(value["displayName"], "Paris, Ile-de-France, France");
    }
}
