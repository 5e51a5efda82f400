//! Itinerary models shared by the generation service, the mock record,
//! and the HTTP layer.
//!
//! Every field deserializes with a default so the strict check can report
//! a missing field by name. `Itinerary::validate` is the shape check applied
//! when the schema policy asks for it; the mock record is built from these
//! types too.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of itinerary lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationVariant {
    OneDay,
    ThreeDays,
    FiveDays,
}

impl DurationVariant {
    pub const ALL: [DurationVariant; 3] = [Self::OneDay, Self::ThreeDays, Self::FiveDays];

    /// JSON key used in `itineraries`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::OneDay => "1day",
            Self::ThreeDays => "3days",
            Self::FiveDays => "5days",
        }
    }

    pub fn day_count(&self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::ThreeDays => 3,
            Self::FiveDays => 5,
        }
    }

    /// Inclusive (min, max) activities requested per day.
    pub fn activity_range(&self) -> (u32, u32) {
        match self {
            Self::OneDay => (5, 6),
            Self::ThreeDays => (4, 5),
            Self::FiveDays => (3, 4),
        }
    }
}

/// One scheduled stop within a day.
///
/// `lat`/`lng` come from the model and are advisory; see
/// `services::location` for how they are checked before use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// A single duration variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub days: Vec<DayPlan>,
}

/// Fixed-key mapping from duration variant to plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itineraries {
    #[serde(rename = "1day", default, skip_serializing_if = "Option::is_none")]
    pub one_day: Option<ItineraryData>,
    #[serde(rename = "3days", default, skip_serializing_if = "Option::is_none")]
    pub three_days: Option<ItineraryData>,
    #[serde(rename = "5days", default, skip_serializing_if = "Option::is_none")]
    pub five_days: Option<ItineraryData>,
}

impl Itineraries {
    pub fn get(&self, variant: DurationVariant) -> Option<&ItineraryData> {
        match variant {
            DurationVariant::OneDay => self.one_day.as_ref(),
            DurationVariant::ThreeDays => self.three_days.as_ref(),
            DurationVariant::FiveDays => self.five_days.as_ref(),
        }
    }
}

/// Root response of a generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub itineraries: Itineraries,
}

/// Shape violations found by `Itinerary::validate`.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("missing itinerary variant '{0}'")]
    MissingVariant(&'static str),

    #[error("itinerary variant '{0}' has no days")]
    EmptyDays(&'static str),

    #[error("itinerary variant '{variant}' has invalid day number {day}")]
    InvalidDay { variant: &'static str, day: u32 },

    #[error("itinerary variant '{variant}' repeats day {day}")]
    DuplicateDay { variant: &'static str, day: u32 },

    #[error("itinerary variant '{variant}' day {day} has an activity without a title")]
    UntitledActivity { variant: &'static str, day: u32 },

    #[error("activity '{title}' has out-of-range coordinates")]
    ActivityCoordinates { title: String },
}

impl Itinerary {
    /// Strict shape check: required strings present, all three variants
    /// present and non-empty, day numbers 1-based and unique per variant.
    ///
    /// Day order is not enforced.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.city.trim().is_empty() {
            return Err(ShapeError::MissingField("city"));
        }
        if self.country.trim().is_empty() {
            return Err(ShapeError::MissingField("country"));
        }

        for variant in DurationVariant::ALL {
            let key = variant.key();
            let data = self
                .itineraries
                .get(variant)
                .ok_or(ShapeError::MissingVariant(key))?;

            if data.days.is_empty() {
                return Err(ShapeError::EmptyDays(key));
            }

            let mut seen = HashSet::new();
            for plan in &data.days {
                if plan.day == 0 {
                    return Err(ShapeError::InvalidDay {
                        variant: key,
                        day: plan.day,
                    });
                }
                if !seen.insert(plan.day) {
                    return Err(ShapeError::DuplicateDay {
                        variant: key,
                        day: plan.day,
                    });
                }

                for activity in &plan.activities {
                    if activity.title.trim().is_empty() {
                        return Err(ShapeError::UntitledActivity {
                            variant: key,
                            day: plan.day,
                        });
                    }
                    let lat_ok = activity.lat.map_or(true, |lat| (-90.0..=90.0).contains(&lat));
                    let lng_ok = activity.lng.map_or(true, |lng| (-180.0..=180.0).contains(&lng));
                    if !lat_ok || !lng_ok {
                        return Err(ShapeError::ActivityCoordinates {
                            title: activity.title.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// Request DTOs
// =============================================================================

/// Body of `POST /api/itinerary`: a city descriptor as returned by search.
///
/// Only `name` and `country` drive generation; the rest is accepted so the
/// client can post a `City` unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateItineraryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    pub lat: Option<f64>,
    #[allow(dead_code)]
    #[serde(default)]
    pub lng: Option<f64>,
    #[allow(dead_code)]
    #[serde(default)]
    pub display_name: Option<String>,
}

#[cfg(test)]
impl GenerateItineraryRequest {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            country: Some(country.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(day: u32, titles: &[&str]) -> DayPlan {
        DayPlan {
            day,
            theme: format!("Day {day}"),
            activities: titles
                .iter()
                .map(|t| Activity {
                    time: "09:00".into(),
                    title: t.to_string(),
                    ..Activity::default()
                })
                .collect(),
        }
    }

    fn complete() -> Itinerary {
        Itinerary {
            city: "Porto".into(),
            country: "Portugal".into(),
            highlights: vec!["Ribeira".into()],
            itineraries: Itineraries {
                one_day: Some(ItineraryData {
                    title: "Porto in a day".into(),
                    days: vec![plan(1, &["Ribeira"])],
                }),
                three_days: Some(ItineraryData {
                    title: "Porto in 3 days".into(),
                    days: vec![plan(1, &["A"]), plan(2, &["B"]), plan(3, &["C"])],
                }),
                five_days: Some(ItineraryData {
                    title: "Porto in 5 days".into(),
                    days: (1..=5).map(|d| plan(d, &["X"])).collect(),
                }),
            },
        }
    }

    #[test]
    fn variant_keys_are_fixed() {
        let keys: Vec<_> = DurationVariant::ALL.iter().map(|v| v.key()).collect();
        assert_eq!(keys, ["1day", "3days", "5days"]);
    }

    #[test]
    fn parses_sparse_model_output() {
        let json = r#"{
            "city": "Porto",
            "itineraries": {
                "1day": {"title": "t", "days": [{"day": 1, "activities": [{"title": "Ribeira"}]}]}
            }
        }"#;
        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        let one_day = itinerary.itineraries.get(DurationVariant::OneDay).unwrap();
        assert_eq!(one_day.days[0].activities[0].title, "Ribeira");
        assert!(one_day.days[0].activities[0].tip.is_none());
        assert!(itinerary.itineraries.five_days.is_none());
    }

    #[test]
    fn serializes_variant_keys() {
        let value = serde_json::to_value(complete()).unwrap();
        let map = value["itineraries"].as_object().unwrap();
        let mut keys: Vec<_> = map.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["1day", "3days", "5days"]);
        assert!(value["itineraries"]["1day"]["days"][0]["activities"][0]
            .get("lat")
            .is_none());
    }

    #[test]
    fn validate_accepts_complete_itinerary() {
        assert_eq!(complete().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_missing_variant() {
        let mut itinerary = complete();
        itinerary.itineraries.five_days = None;
        assert_eq!(itinerary.validate(), Err(ShapeError::MissingVariant("5days")));
    }

    #[test]
    fn validate_rejects_duplicate_and_zero_days() {
        let mut itinerary = complete();
        itinerary.itineraries.three_days = Some(ItineraryData {
            title: "t".into(),
            days: vec![plan(1, &["A"]), plan(1, &["B"])],
        });
        assert_eq!(
            itinerary.validate(),
            Err(ShapeError::DuplicateDay { variant: "3days", day: 1 })
        );

        let mut itinerary = complete();
        itinerary.itineraries.one_day = Some(ItineraryData {
            title: "t".into(),
            days: vec![plan(0, &["A"])],
        });
        assert_eq!(
            itinerary.validate(),
            Err(ShapeError::InvalidDay { variant: "1day", day: 0 })
        );
    }

    #[test]
    fn validate_allows_unordered_days() {
        let mut itinerary = complete();
        itinerary.itineraries.three_days = Some(ItineraryData {
            title: "t".into(),
            days: vec![plan(3, &["C"]), plan(1, &["A"]), plan(2, &["B"])],
        });
        assert_eq!(itinerary.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_untitled_activity() {
        let mut itinerary = complete();
        itinerary.itineraries.one_day = Some(ItineraryData {
            title: "t".into(),
            days: vec![plan(1, &["  "])],
        });
        assert_eq!(
            itinerary.validate(),
            Err(ShapeError::UntitledActivity { variant: "1day", day: 1 })
        );
    }

    #[test]
    fn request_accepts_city_shape() {
        let req: GenerateItineraryRequest = serde_json::from_str(
            r#"{"name":"Paris","country":"France","lat":48.85,"lng":2.35,"displayName":"Paris, France"}"#,
        )
        .unwrap();
        assert_eq!(req.name.as_deref(), Some("Paris"));
        assert_eq!(req.display_name.as_deref(), Some("Paris, France"));
    }
}
