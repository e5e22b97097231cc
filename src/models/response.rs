//! Aggregated response and location-resolution provenance

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::items::{BookItem, CafeItem, MovieItem, PlaylistItem, VideoItem};
use super::query::Coordinates;

/// How the effective coordinates for the cafe search were obtained
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Caller supplied both latitude and longitude
    ProvidedCoordinates,
    /// Location name was geocoded successfully
    Geocoded,
    /// Location name was given but geocoding produced nothing
    GeocodeFailed,
    /// No location information was supplied
    NotRequested,
}

/// Outcome of the location-resolution step
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationResolution {
    /// The location name the caller asked for, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_location: Option<String>,
    /// Effective coordinates, when resolution succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// How the coordinates were (or were not) obtained
    pub provenance: Provenance,
}

impl LocationResolution {
    /// Caller supplied explicit coordinates; any location name is recorded
    /// but was never geocoded.
    #[must_use]
    pub fn provided(requested_location: Option<String>, coordinates: Coordinates) -> Self {
        Self {
            requested_location,
            coordinates: Some(coordinates),
            provenance: Provenance::ProvidedCoordinates,
        }
    }

    /// Location name resolved to coordinates
    #[must_use]
    pub fn geocoded<S: Into<String>>(requested_location: S, coordinates: Coordinates) -> Self {
        Self {
            requested_location: Some(requested_location.into()),
            coordinates: Some(coordinates),
            provenance: Provenance::Geocoded,
        }
    }

    /// Location name was given but could not be resolved
    #[must_use]
    pub fn geocode_failed<S: Into<String>>(requested_location: S) -> Self {
        Self {
            requested_location: Some(requested_location.into()),
            coordinates: None,
            provenance: Provenance::GeocodeFailed,
        }
    }

    /// No location information was supplied at all
    #[must_use]
    pub fn not_requested() -> Self {
        Self {
            requested_location: None,
            coordinates: None,
            provenance: Provenance::NotRequested,
        }
    }
}

/// The combined recommendation bundle returned for one vibe query
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AggregatedResponse {
    /// The vibe description the plan was built for
    pub vibe: String,
    /// Playlist recommendations
    pub music: Vec<PlaylistItem>,
    /// Recipe video recommendations
    pub videos: Vec<VideoItem>,
    /// Book recommendations
    pub books: Vec<BookItem>,
    /// Movie recommendations
    pub movies: Vec<MovieItem>,
    /// Nearby cafe recommendations
    pub cafes: Vec<CafeItem>,
    /// How coordinates for the cafe search were obtained
    pub location: LocationResolution,
    /// Item count per provider slot
    pub counts: BTreeMap<String, usize>,
    /// When this response was assembled
    pub generated_at: DateTime<Utc>,
}

impl AggregatedResponse {
    /// Count every provider slot into the `counts` map
    #[must_use]
    pub fn count_slots(
        music: usize,
        videos: usize,
        books: usize,
        movies: usize,
        cafes: usize,
    ) -> BTreeMap<String, usize> {
        BTreeMap::from([
            ("music".to_string(), music),
            ("videos".to_string(), videos),
            ("books".to_string(), books),
            ("movies".to_string(), movies),
            ("cafes".to_string(), cafes),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(Provenance::ProvidedCoordinates).unwrap(),
            "provided-coordinates"
        );
        assert_eq!(
            serde_json::to_value(Provenance::Geocoded).unwrap(),
            "geocoded"
        );
        assert_eq!(
            serde_json::to_value(Provenance::GeocodeFailed).unwrap(),
            "geocode-failed"
        );
        assert_eq!(
            serde_json::to_value(Provenance::NotRequested).unwrap(),
            "not-requested"
        );
    }

    #[test]
    fn test_resolution_constructors() {
        let provided =
            LocationResolution::provided(Some("Seattle".to_string()), Coordinates::new(1.0, 2.0));
        assert_eq!(provided.provenance, Provenance::ProvidedCoordinates);
        assert!(provided.coordinates.is_some());

        let failed = LocationResolution::geocode_failed("Atlantis");
        assert_eq!(failed.provenance, Provenance::GeocodeFailed);
        assert!(failed.coordinates.is_none());
        assert_eq!(failed.requested_location.as_deref(), Some("Atlantis"));

        let none = LocationResolution::not_requested();
        assert_eq!(none.provenance, Provenance::NotRequested);
        assert!(none.requested_location.is_none());
    }

    #[test]
    fn test_count_slots_covers_every_provider() {
        let counts = AggregatedResponse::count_slots(1, 2, 3, 4, 5);
        assert_eq!(counts["music"], 1);
        assert_eq!(counts["videos"], 2);
        assert_eq!(counts["books"], 3);
        assert_eq!(counts["movies"], 4);
        assert_eq!(counts["cafes"], 5);
        assert_eq!(counts.len(), 5);
    }
}
