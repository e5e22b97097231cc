//! Google Books volume search client
//!
//! The volumes endpoint works without an API key, so this is the only
//! provider that can never be "skipped".

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{BookProvider, ProviderError, ProviderResult, check_status};
use crate::models::BookItem;

const PROVIDER: &str = "google-books";
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const MAX_RESULTS: u32 = 40;

/// Google Books API client
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
}

impl GoogleBooksClient {
    /// Create a new client
    pub fn new(client: Client) -> Self {
        Self {
            client,
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
impl BookProvider for GoogleBooksClient {
    async fn search_books(&self, vibe: &str, limit: u32) -> ProviderResult<Vec<BookItem>> {
        let limit = limit.clamp(1, MAX_RESULTS);
        let url = format!(
            "{}/books/v1/volumes?q={}&maxResults={}",
            self.base_url,
            urlencoding::encode(vibe),
            limit
        );
        debug!("Google Books search for vibe '{vibe}'");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e.to_string()))?;
        let response = check_status(PROVIDER, response)?;

        let payload: VolumesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(PROVIDER, e.to_string()))?;

        let items: Vec<BookItem> = payload
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(Volume::into_item)
            .collect();

        info!(count = items.len(), "Google Books search complete");
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    // Absent entirely when nothing matched
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(rename = "infoLink")]
    info_link: Option<String>,
}

impl Volume {
    /// Convert to a normalized item; volumes without a title are dropped
    fn into_item(self) -> Option<BookItem> {
        let info = self.volume_info?;
        let title = info.title.filter(|title| !title.is_empty())?;
        Some(BookItem {
            title,
            authors: info.authors,
            link: info.info_link,
        })
    }
}
