//! Pulling an itinerary out of free-form model text.
//!
//! The model is told to answer with bare JSON but may wrap it in prose or
//! code fences. We take everything from the first `{` to the last `}`
//! (not a balanced-brace parse) and hand that to the JSON parser.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::Itinerary;
use crate::error::ApiError;

/// How much shape checking happens after the JSON parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Accept any JSON object that parses, passed through untouched.
    #[default]
    Lenient,
    /// Additionally require the full itinerary shape (`Itinerary::validate`).
    Strict,
}

impl FromStr for SchemaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown schema policy '{other}' (expected lenient or strict)")),
        }
    }
}

impl fmt::Display for SchemaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Outermost brace span of the trimmed text, inclusive.
pub fn outermost_brace_span(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
}

/// Parse the candidate span as JSON.
pub fn extract_json(text: &str) -> Result<serde_json::Value, ApiError> {
    let span = outermost_brace_span(text).ok_or_else(|| {
        ApiError::MalformedModelOutput("response contains no JSON object".to_string())
    })?;

    serde_json::from_str(span).map_err(|e| ApiError::MalformedModelOutput(e.to_string()))
}

/// Extract an itinerary from model text and apply `policy`.
///
/// The parsed value is returned as-is under either policy, so fields the
/// model adds survive the round trip. Strict mode only gates it on the
/// typed shape check.
pub fn extract_itinerary(
    text: &str,
    policy: SchemaPolicy,
) -> Result<serde_json::Value, ApiError> {
    let value = extract_json(text)?;

    if policy == SchemaPolicy::Strict {
        let itinerary = Itinerary::deserialize(&value)
            .map_err(|e| ApiError::MalformedModelOutput(e.to_string()))?;
        itinerary
            .validate()
            .map_err(|e| ApiError::MalformedModelOutput(e.to_string()))?;
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DurationVariant;
    use serde_json::json;

    #[test]
    fn span_ignores_surrounding_prose() {
        let text = r#"Sure! Here's the plan: {"city":"X", "country":"Y"} Hope that helps!"#;
        assert_eq!(
            outermost_brace_span(text),
            Some(r#"{"city":"X", "country":"Y"}"#)
        );
        let value = extract_json(text).unwrap();
        assert_eq!(value["city"], "X");
    }

    #[test]
    fn span_strips_code_fences() {
        let text = "```json\n{\"city\": \"Lyon\", \"highlights\": [\"Fourviere\"]}\n```";
        let itinerary = extract_itinerary(text, SchemaPolicy::Lenient).unwrap();
        assert_eq!(itinerary["city"], "Lyon");
        assert_eq!(itinerary["highlights"], json!(["Fourviere"]));
    }

    #[test]
    fn span_is_greedy_not_balanced() {
        let text = r#"{"a": 1} and then {"b": 2}"#;
        assert_eq!(outermost_brace_span(text), Some(text));
        // The greedy span is not valid JSON, so parsing must fail
        let err = extract_json(text).unwrap_err();
        assert!(matches!(err, ApiError::MalformedModelOutput(_)));
    }

    #[test]
    fn no_brace_is_malformed_without_parse() {
        let err = extract_json("I cannot help with that.").unwrap_err();
        match err {
            ApiError::MalformedModelOutput(msg) => {
                assert_eq!(msg, "response contains no JSON object")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(outermost_brace_span("} backwards {").is_none());
        assert!(outermost_brace_span("").is_none());
    }

    #[test]
    fn invalid_json_carries_parser_message() {
        let err = extract_json("{ city: Paris }").unwrap_err();
        match err {
            ApiError::MalformedModelOutput(msg) => assert!(msg.contains("key must be a string")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    const LOOSELY_TYPED: &str = r#"{"city":"Paris","country":"France","budget":"mid","highlights":["Louvre"],"itineraries":{
        "1day":{"title":"t","days":[{"day":1.0,"theme":"x","activities":[{"time":"09:00","title":"Louvre","description":null,"lat":"48.8606","lng":"2.3376"}]}]}}}"#;

    #[test]
    fn lenient_passes_loosely_typed_json_through() {
        let itinerary = extract_itinerary(LOOSELY_TYPED, SchemaPolicy::Lenient).unwrap();
        let louvre = &itinerary["itineraries"]["1day"]["days"][0]["activities"][0];
        assert_eq!(louvre["lat"], "48.8606");
        assert_eq!(louvre["lng"], "2.3376");
        assert!(louvre["description"].is_null());
        assert_eq!(itinerary["itineraries"]["1day"]["days"][0]["day"], 1.0);
        assert_eq!(itinerary["budget"], "mid");
    }

    #[test]
    fn lenient_keeps_fields_the_model_adds() {
        let text = r#"{"highlights": "not a list", "notes": {"pace": "slow"}}"#;
        let itinerary = extract_itinerary(text, SchemaPolicy::Lenient).unwrap();
        assert_eq!(itinerary["highlights"], "not a list");
        assert_eq!(itinerary["notes"]["pace"], "slow");
    }

    #[test]
    fn strict_rejects_wrong_field_types() {
        let err = extract_itinerary(LOOSELY_TYPED, SchemaPolicy::Strict).unwrap_err();
        assert!(matches!(err, ApiError::MalformedModelOutput(_)));
    }

    #[test]
    fn lenient_accepts_partial_shape_strict_rejects_it() {
        let text = r#"{"city":"Rome","country":"Italy","itineraries":{"1day":{"title":"t","days":[{"day":1,"theme":"x","activities":[{"time":"09:00","title":"Colosseum"}]}]}}}"#;

        let itinerary = extract_itinerary(text, SchemaPolicy::Lenient).unwrap();
        assert!(itinerary["itineraries"].get(DurationVariant::OneDay.key()).is_some());
        assert!(itinerary["itineraries"].get(DurationVariant::ThreeDays.key()).is_none());

        let err = extract_itinerary(text, SchemaPolicy::Strict).unwrap_err();
        match err {
            ApiError::MalformedModelOutput(msg) => assert!(msg.contains("3days")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn policy_parses() {
        assert_eq!("Strict".parse::<SchemaPolicy>(), Ok(SchemaPolicy::Strict));
        assert_eq!(" lenient ".parse::<SchemaPolicy>(), Ok(SchemaPolicy::Lenient));
        assert!("loose".parse::<SchemaPolicy>().is_err());
        assert_eq!(SchemaPolicy::Strict.to_string(), "strict");
    }
}
