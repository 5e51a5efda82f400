//! Prompt construction for live itinerary generation.

use crate::domain::DurationVariant;

/// JSON skeleton shown to the model. `{{CITY}}` and `{{COUNTRY}}` are
/// substituted before sending.
const ITINERARY_SKELETON: &str = r#"{
  "city": "{{CITY}}",
  "country": "{{COUNTRY}}",
  "highlights": [
    "Landmark 1",
    "Landmark 2",
    "Landmark 3",
    "Landmark 4",
    "Landmark 5"
  ],
  "itineraries": {
    "1day": {
      "title": "The Best of {{CITY}} in 1 Day",
      "days": [
        {
          "day": 1,
          "theme": "Essential Highlights",
          "activities": [
            {
              "time": "09:00",
              "title": "Exact name of the place",
              "description": "What to do and see at this place.",
              "tip": "Practical tip (price, opening hours, how to get there, booking).",
              "emoji": "🏛️",
              "lat": 0.0,
              "lng": 0.0
            }
          ]
        }
      ]
    },
    "3days": {
      "title": "Exploring {{CITY}} in 3 Days",
      "days": [
        { "day": 1, "theme": "Theme of day 1", "activities": [...] },
        { "day": 2, "theme": "Theme of day 2", "activities": [...] },
        { "day": 3, "theme": "Theme of day 3", "activities": [...] }
      ]
    },
    "5days": {
      "title": "{{CITY}} in Depth: 5 Days",
      "days": [
        { "day": 1, "theme": "Theme of day 1", "activities": [...] },
        { "day": 2, "theme": "Theme of day 2", "activities": [...] },
        { "day": 3, "theme": "Theme of day 3", "activities": [...] },
        { "day": 4, "theme": "Theme of day 4", "activities": [...] },
        { "day": 5, "theme": "Theme of day 5", "activities": [...] }
      ]
    }
  }
}"#;

fn activity_rule(variant: DurationVariant) -> String {
    let (min, max) = variant.activity_range();
    match variant {
        DurationVariant::OneDay => {
            format!("- The 1-day itinerary (\"1day\") must have {min} to {max} activities")
        }
        _ => format!(
            "- Each day of the {}-day itinerary (\"{}\") must have {min} to {max} activities",
            variant.day_count(),
            variant.key()
        ),
    }
}

/// Build the single-turn prompt for `name, country`.
pub fn build_itinerary_prompt(name: &str, country: &str) -> String {
    let skeleton = ITINERARY_SKELETON
        .replace("{{CITY}}", name)
        .replace("{{COUNTRY}}", country);

    let keys = DurationVariant::ALL
        .iter()
        .map(|v| format!("\"{}\"", v.key()))
        .collect::<Vec<_>>()
        .join(", ");

    let activity_rules = DurationVariant::ALL
        .iter()
        .map(|v| activity_rule(*v))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a travel expert with up-to-date knowledge of destinations around the world.

Create detailed, practical sightseeing itineraries for **{name}, {country}**.

Return ONLY valid JSON, with no additional text, using exactly this structure:

{skeleton}

Important rules:
- \"itineraries\" must contain exactly these keys: {keys}
{activity_rules}
- Include a relevant emoji for every activity
- Times must be realistic and account for travel time between places
- Tips must be practical and useful (approximate prices, transport, booking advice)
- Every activity MUST include \"lat\" and \"lng\": the real-world GPS coordinates of that exact place, located in or near {name}, {country}
- Coordinates must be accurate enough to place a pin on a map; never reuse the city center for a specific place
- Return ONLY the JSON, without markdown code fences and without any text before or after it"
    )
}
