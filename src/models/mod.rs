//! Data models for the VibePlanner application
//!
//! This module contains the request-scoped value objects organized by concern:
//! - Query: the incoming vibe request and coordinates
//! - Items: normalized per-provider recommendation items
//! - Response: location-resolution provenance and the aggregated response

pub mod items;
pub mod query;
pub mod response;

// Re-export all public types for convenient access
pub use items::{BookItem, CafeItem, MovieItem, PlaylistItem, VideoItem};
pub use query::{Coordinates, VibeQuery};
pub use response::{AggregatedResponse, LocationResolution, Provenance};
