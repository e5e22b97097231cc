//! `VibePlanner` - Mood-based recommendation aggregation
//!
//! This library queries five independent content providers (music playlists,
//! recipe videos, books, movies, nearby cafes) for a free-text vibe
//! description and assembles a combined response that survives individual
//! provider outages.

pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod location_resolver;
pub mod models;
pub mod planner;
pub mod providers;
pub mod web;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use fallback::{CafeFallbackSearch, MovieFallbackSearch};
pub use location_resolver::LocationResolver;
pub use models::{
    AggregatedResponse, BookItem, CafeItem, Coordinates, LocationResolution, MovieItem,
    PlaylistItem, Provenance, VibeQuery, VideoItem,
};
pub use planner::VibePlanner;
pub use providers::{ProviderError, ProviderResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
