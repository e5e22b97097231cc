//! Normalized recommendation items, one type per provider
//!
//! Each item carries only the fields the response consumers actually use.
//! An item missing its required display field is dropped during provider
//! normalization instead of being emitted with a placeholder.

use serde::{Deserialize, Serialize};

/// A music playlist recommendation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaylistItem {
    /// Playlist name
    pub name: String,
    /// Link to open the playlist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A recipe video recommendation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoItem {
    /// Video title
    pub title: String,
    /// Watch link
    pub link: String,
}

/// A book recommendation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookItem {
    /// Book title
    pub title: String,
    /// Author names, possibly empty
    #[serde(default)]
    pub authors: Vec<String>,
    /// Link to more information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A movie recommendation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieItem {
    /// Movie title
    pub title: String,
    /// Release year as reported by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Media kind (movie, series, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A nearby cafe recommendation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CafeItem {
    /// Place name
    pub name: String,
    /// Street address or vicinity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Provider rating, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Link to the place on a map
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_item_serializes_kind_as_type() {
        let item = MovieItem {
            title: "Alien".to_string(),
            year: Some("1979".to_string()),
            kind: Some("movie".to_string()),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "movie");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let item = CafeItem {
            name: "Corner Cafe".to_string(),
            address: None,
            rating: None,
            maps_link: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["name"], "Corner Cafe");
    }
}
