//! Provider clients for the external content APIs
//!
//! This module provides one client per external source plus the shared
//! provider contract:
//! - Spotify playlist search (client-credential token exchange)
//! - YouTube recipe video search
//! - Google Books volume search
//! - OMDb movie search
//! - Google Places nearby search
//! - Google Geocoding forward lookup
//!
//! Every client speaks the same failure taxonomy (`ProviderError`) so the
//! aggregation layer can isolate and classify failures uniformly.

pub mod geocoding;
pub mod google_books;
pub mod omdb;
pub mod places;
pub mod spotify;
pub mod youtube;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BookItem, CafeItem, Coordinates, MovieItem, PlaylistItem, VideoItem};

// Re-export the concrete clients
pub use geocoding::GeocodingClient;
pub use google_books::GoogleBooksClient;
pub use omdb::OmdbClient;
pub use places::GooglePlacesClient;
pub use spotify::SpotifyClient;
pub use youtube::YouTubeClient;

/// Result type shared by every provider client
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Failure reported by one specific provider
///
/// `Unauthorized` and `QuotaExhausted` are terminal: retrying the same
/// provider with a different query cannot help, so fallback loops stop.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Connection or timeout failure
    #[error("{provider}: network error: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    /// Response body could not be parsed or was missing required data
    #[error("{provider}: invalid response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    /// Provider rejected the configured credentials
    #[error("{provider}: unauthorized: {message}")]
    Unauthorized {
        provider: &'static str,
        message: String,
    },

    /// Provider reports the request quota as exhausted
    #[error("{provider}: quota exhausted: {message}")]
    QuotaExhausted {
        provider: &'static str,
        message: String,
    },

    /// Any other provider-reported error
    #[error("{provider}: API error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Create a network error
    pub fn network<S: Into<String>>(provider: &'static str, message: S) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    /// Create an invalid-response error
    pub fn invalid_response<S: Into<String>>(provider: &'static str, message: S) -> Self {
        Self::InvalidResponse {
            provider,
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(provider: &'static str, message: S) -> Self {
        Self::Unauthorized {
            provider,
            message: message.into(),
        }
    }

    /// Create a quota-exhausted error
    pub fn quota_exhausted<S: Into<String>>(provider: &'static str, message: S) -> Self {
        Self::QuotaExhausted {
            provider,
            message: message.into(),
        }
    }

    /// Create a generic API error
    pub fn api<S: Into<String>>(provider: &'static str, message: S) -> Self {
        Self::Api {
            provider,
            message: message.into(),
        }
    }

    /// Which provider reported this failure
    #[must_use]
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Network { provider, .. }
            | Self::InvalidResponse { provider, .. }
            | Self::Unauthorized { provider, .. }
            | Self::QuotaExhausted { provider, .. }
            | Self::Api { provider, .. } => provider,
        }
    }

    /// Whether further queries against this provider are futile
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::QuotaExhausted { .. }
        )
    }
}

/// Map a non-success HTTP status to the provider failure taxonomy
pub(crate) fn check_status(
    provider: &'static str,
    response: reqwest::Response,
) -> ProviderResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status.as_u16() {
        401 | 403 => Err(ProviderError::unauthorized(provider, format!("HTTP {status}"))),
        429 => Err(ProviderError::quota_exhausted(
            provider,
            format!("HTTP {status}"),
        )),
        _ => Err(ProviderError::api(provider, format!("HTTP {status}"))),
    }
}

/// Map a Google-style status string (Places, Geocoding) to an error.
///
/// Callers handle `OK` and `ZERO_RESULTS` themselves; everything else lands
/// here.
pub(crate) fn google_status_error(
    provider: &'static str,
    status: &str,
    detail: Option<String>,
) -> ProviderError {
    let message = detail.unwrap_or_else(|| format!("status {status}"));
    match status {
        "REQUEST_DENIED" => ProviderError::unauthorized(provider, message),
        "OVER_QUERY_LIMIT" => ProviderError::quota_exhausted(provider, message),
        _ => ProviderError::api(provider, message),
    }
}

/// Place-category hint for nearby searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceCategory {
    Cafe,
    Restaurant,
}

impl PlaceCategory {
    /// The provider-side type parameter value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
        }
    }
}

/// Playlist search seam
#[async_trait]
pub trait PlaylistProvider: Send + Sync {
    /// Search playlists matching the vibe description
    async fn search_playlists(&self, vibe: &str, limit: u32) -> ProviderResult<Vec<PlaylistItem>>;
}

/// Recipe video search seam
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Search recipe videos matching the vibe description
    async fn search_recipe_videos(&self, vibe: &str, limit: u32)
    -> ProviderResult<Vec<VideoItem>>;
}

/// Book search seam
#[async_trait]
pub trait BookProvider: Send + Sync {
    /// Search books matching the vibe description
    async fn search_books(&self, vibe: &str, limit: u32) -> ProviderResult<Vec<BookItem>>;
}

/// Movie search seam; driven by the movie fallback strategy
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search movies for one candidate term
    async fn search_movies(&self, term: &str, limit: u32) -> ProviderResult<Vec<MovieItem>>;
}

/// Nearby-place search seam; driven by the cafe fallback strategy
#[async_trait]
pub trait CafeProvider: Send + Sync {
    /// Search places near the coordinates for one keyword/category pair
    async fn search_nearby(
        &self,
        keyword: &str,
        category: PlaceCategory,
        coordinates: Coordinates,
        limit: u32,
    ) -> ProviderResult<Vec<CafeItem>>;
}

/// Forward-geocoding seam
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text place name to coordinates, `None` when no match
    async fn geocode(&self, location: &str) -> ProviderResult<Option<Coordinates>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(ProviderError::unauthorized("omdb", "bad key").is_terminal());
        assert!(ProviderError::quota_exhausted("places", "limit").is_terminal());
        assert!(!ProviderError::network("spotify", "refused").is_terminal());
        assert!(!ProviderError::invalid_response("youtube", "truncated").is_terminal());
        assert!(!ProviderError::api("books", "HTTP 500").is_terminal());
    }

    #[test]
    fn test_provider_tag_is_preserved() {
        let err = ProviderError::network("spotify", "connection refused");
        assert_eq!(err.provider(), "spotify");
        assert!(err.to_string().contains("spotify"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_google_status_error_classes() {
        assert!(google_status_error("places", "REQUEST_DENIED", None).is_terminal());
        assert!(google_status_error("places", "OVER_QUERY_LIMIT", None).is_terminal());
        assert!(!google_status_error("places", "INVALID_REQUEST", None).is_terminal());
    }

    #[test]
    fn test_google_status_error_prefers_detail_message() {
        let err = google_status_error(
            "geocoding",
            "REQUEST_DENIED",
            Some("The provided API key is invalid".to_string()),
        );
        assert!(err.to_string().contains("API key is invalid"));
    }

    #[test]
    fn test_place_category_parameter_values() {
        assert_eq!(PlaceCategory::Cafe.as_str(), "cafe");
        assert_eq!(PlaceCategory::Restaurant.as_str(), "restaurant");
    }
}
