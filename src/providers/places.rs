//! Google Places nearby-search client
//!
//! The Places API reports its own status string in the payload;
//! `REQUEST_DENIED` and `OVER_QUERY_LIMIT` are terminal for the whole
//! fallback sequence, while `ZERO_RESULTS` just means "try the next
//! strategy".

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{
    CafeProvider, PlaceCategory, ProviderError, ProviderResult, check_status, google_status_error,
};
use crate::models::{CafeItem, Coordinates};

const PROVIDER: &str = "places";
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";
const SEARCH_RADIUS_METERS: u32 = 5000;

/// Google Places API client
pub struct GooglePlacesClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GooglePlacesClient {
    /// Create a new client; a missing key means the provider is skipped
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API endpoint (test seam)
    #[must_use]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CafeProvider for GooglePlacesClient {
    async fn search_nearby(
        &self,
        keyword: &str,
        category: PlaceCategory,
        coordinates: Coordinates,
        limit: u32,
    ) -> ProviderResult<Vec<CafeItem>> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("Google Places API key not configured, skipping provider");
            return Ok(Vec::new());
        };

        let limit = limit.max(1);
        let url = format!(
            "{}/maps/api/place/nearbysearch/json?location={},{}&radius={}&keyword={}&type={}&key={}",
            self.base_url,
            coordinates.latitude,
            coordinates.longitude,
            SEARCH_RADIUS_METERS,
            urlencoding::encode(keyword),
            category.as_str(),
            api_key
        );
        debug!(
            "Google Places nearby search for '{keyword}' ({}) at {}",
            category.as_str(),
            coordinates.format()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e.to_string()))?;
        let response = check_status(PROVIDER, response)?;

        let payload: NearbySearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(PROVIDER, e.to_string()))?;

        match payload.status.as_deref() {
            Some("OK") => {
                let items: Vec<CafeItem> = payload
                    .results
                    .into_iter()
                    .filter_map(PlaceEntry::into_item)
                    .take(limit as usize)
                    .collect();
                info!(count = items.len(), keyword = %keyword, "Google Places search complete");
                Ok(items)
            }
            Some("ZERO_RESULTS") => {
                debug!("Google Places returned no results for '{keyword}'");
                Ok(Vec::new())
            }
            Some(status) => Err(google_status_error(PROVIDER, status, payload.error_message)),
            None => Err(ProviderError::invalid_response(
                PROVIDER,
                "response missing status field",
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: Option<String>,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaceEntry {
    name: Option<String>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    place_id: Option<String>,
}

impl PlaceEntry {
    /// Convert to a normalized item; places without a name are dropped
    fn into_item(self) -> Option<CafeItem> {
        let name = self.name.filter(|name| !name.is_empty())?;
        Some(CafeItem {
            name,
            address: self.vicinity.or(self.formatted_address),
            rating: self.rating,
            maps_link: self
                .place_id
                .map(|id| format!("https://www.google.com/maps/place/?q=place_id:{id}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> Option<CafeItem> {
        serde_json::from_value::<PlaceEntry>(value)
            .unwrap()
            .into_item()
    }

    #[test]
    fn test_place_normalization() {
        let cafe = item(json!({
            "name": "Storm Cellar Coffee",
            "vicinity": "123 Pine St, Seattle",
            "rating": 4.6,
            "place_id": "ChIJabc"
        }))
        .unwrap();
        assert_eq!(cafe.name, "Storm Cellar Coffee");
        assert_eq!(cafe.address.as_deref(), Some("123 Pine St, Seattle"));
        assert_eq!(cafe.rating, Some(4.6));
        assert_eq!(
            cafe.maps_link.as_deref(),
            Some("https://www.google.com/maps/place/?q=place_id:ChIJabc")
        );
    }

    #[test]
    fn test_place_without_name_is_dropped() {
        assert!(item(json!({"vicinity": "somewhere"})).is_none());
        assert!(item(json!({"name": ""})).is_none());
    }

    #[test]
    fn test_formatted_address_fallback() {
        let cafe = item(json!({
            "name": "Annex",
            "formatted_address": "45 Rue de Rivoli, Paris"
        }))
        .unwrap();
        assert_eq!(cafe.address.as_deref(), Some("45 Rue de Rivoli, Paris"));
    }

    #[test]
    fn test_vicinity_takes_precedence_over_formatted_address() {
        let cafe = item(json!({
            "name": "Annex",
            "vicinity": "Rivoli",
            "formatted_address": "45 Rue de Rivoli, Paris"
        }))
        .unwrap();
        assert_eq!(cafe.address.as_deref(), Some("Rivoli"));
    }
}
