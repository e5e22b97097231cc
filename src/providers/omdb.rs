//! OMDb movie search client
//!
//! OMDb reports "no results" as a 200 response with `Response: "False"`,
//! so classification happens on the payload, not just the status code. Bad
//! API keys come back as HTTP 401; request-limit exhaustion as a `False`
//! response whose error text names the limit.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{MovieProvider, ProviderError, ProviderResult, check_status};
use crate::models::MovieItem;

const PROVIDER: &str = "omdb";
const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

/// OMDb API client
pub struct OmdbClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OmdbClient {
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
impl MovieProvider for OmdbClient {
    async fn search_movies(&self, term: &str, limit: u32) -> ProviderResult<Vec<MovieItem>> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("OMDb API key not configured, skipping provider");
            return Ok(Vec::new());
        };

        let limit = limit.max(1);
        let url = format!(
            "{}/?apikey={}&s={}",
            self.base_url,
            api_key,
            urlencoding::encode(term)
        );
        debug!("OMDb search for term '{term}'");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e.to_string()))?;
        let response = check_status(PROVIDER, response)?;

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(PROVIDER, e.to_string()))?;

        if payload.response.as_deref() == Some("False") {
            let message = payload
                .error
                .unwrap_or_else(|| "no results found".to_string());
            if message.to_lowercase().contains("limit") {
                return Err(ProviderError::quota_exhausted(PROVIDER, message));
            }
            debug!("OMDb reported no results for '{term}': {message}");
            return Ok(Vec::new());
        }

        let items: Vec<MovieItem> = payload
            .search
            .unwrap_or_default()
            .into_iter()
            .filter_map(SearchEntry::into_item)
            .take(limit as usize)
            .collect();

        info!(count = items.len(), term = %term, "OMDb search complete");
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search")]
    search: Option<Vec<SearchEntry>>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
}

impl SearchEntry {
    /// Convert to a normalized item; entries without a title are dropped
    fn into_item(self) -> Option<MovieItem> {
        let title = self.title.filter(|title| !title.is_empty())?;
        Some(MovieItem {
            title,
            year: self.year,
            kind: self.kind,
        })
    }
}
