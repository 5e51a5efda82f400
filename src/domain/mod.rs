//! Domain types and DTOs
//!
//! These types define the itinerary and place data exchanged with clients
//! and external providers.

pub mod itinerary;
pub mod location;
pub mod place;

// Re-export commonly used types
pub use itinerary::*;
pub use location::*;
pub use place::*;
