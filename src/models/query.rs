//! Incoming vibe query and coordinate value objects

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create new coordinates
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a "lat, lon" string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A mood/vibe request as received from the caller
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct VibeQuery {
    /// Short free-text mood description, e.g. "cozy rainy day"
    pub description: String,
    /// Optional free-text location name, e.g. "Seattle"
    #[serde(default)]
    pub location: Option<String>,
    /// Optional explicit latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Optional explicit longitude
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl VibeQuery {
    /// Create a query with just a vibe description
    #[must_use]
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Attach a free-text location name
    #[must_use]
    pub fn with_location<S: Into<String>>(mut self, location: S) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach explicit coordinates
    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Explicit coordinates, if both halves were supplied.
    ///
    /// A lone latitude or longitude does not count: the pair falls through to
    /// geocoding of the location name, if one exists.
    #[must_use]
    pub fn explicit_coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Location name with surrounding whitespace stripped, if non-empty
    #[must_use]
    pub fn trimmed_location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}
