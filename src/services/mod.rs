//! Service layer modules for itinerary generation and place resolution.
//!
//! Contains the language-model client, the Nominatim geocoding client, and
//! the pure logic (prompting, extraction, plausibility) they feed.

pub mod extraction;
pub mod geocoding;
pub mod itinerary;
pub mod llm_client;
pub mod location;
pub mod mock_data;
pub mod prompts;

pub use extraction::SchemaPolicy;
pub use geocoding::{Geocoder, NominatimClient};
pub use itinerary::{GenerationMode, ItineraryService};
pub use llm_client::LlmClient;
