//! Google Geocoding forward-lookup client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Geocoder, ProviderError, ProviderResult, check_status, google_status_error};
use crate::models::Coordinates;

const PROVIDER: &str = "geocoding";
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Google Geocoding API client
pub struct GeocodingClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeocodingClient {
    /// Create a new client; a missing key means lookups resolve to nothing
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
impl Geocoder for GeocodingClient {
    async fn geocode(&self, location: &str) -> ProviderResult<Option<Coordinates>> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("Geocoding API key not configured, skipping lookup");
            return Ok(None);
        };

        let url = format!(
            "{}/maps/api/geocode/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(location),
            api_key
        );
        debug!("Geocoding '{location}'");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e.to_string()))?;
        let response = check_status(PROVIDER, response)?;

        let payload: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(PROVIDER, e.to_string()))?;

        match payload.status.as_deref() {
            // First candidate wins
            Some("OK") => Ok(payload
                .results
                .into_iter()
                .next()
                .and_then(|result| result.geometry)
                .and_then(|geometry| geometry.location)
                .map(|point| Coordinates::new(point.lat, point.lng))),
            Some("ZERO_RESULTS") => {
                debug!("No geocoding match for '{location}'");
                Ok(None)
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
struct GeocodeResponse {
    status: Option<String>,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeEntry>,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<GeoPoint>,
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    lat: f64,
    lng: f64,
}
