//! Spotify playlist search client
//!
//! Spotify requires a client-credential token exchange before the search
//! call. The token is fetched per search and never cached.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{PlaylistProvider, ProviderError, ProviderResult, check_status};
use crate::models::PlaylistItem;

const PROVIDER: &str = "spotify";
const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com";
const MAX_RESULTS: u32 = 50;

/// Spotify Web API client
pub struct SpotifyClient {
    client: Client,
    client_id: Option<String>,
    client_secret: Option<String>,
    accounts_base_url: String,
    api_base_url: String,
}

impl SpotifyClient {
    /// Create a new client; missing credentials mean the provider is skipped
    pub fn new(client: Client, client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self {
            client,
            client_id,
            client_secret,
            accounts_base_url: DEFAULT_ACCOUNTS_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Override the token and API endpoints (test seam)
    #[must_use]
    pub fn with_base_urls<S: Into<String>>(mut self, accounts: S, api: S) -> Self {
        self.accounts_base_url = accounts.into();
        self.api_base_url = api.into();
        self
    }

    /// Exchange client credentials for a short-lived access token
    async fn fetch_access_token(&self, id: &str, secret: &str) -> ProviderResult<String> {
        let url = format!("{}/api/token", self.accounts_base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(id, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e.to_string()))?;
        let response = check_status(PROVIDER, response)?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(PROVIDER, e.to_string()))?;

        match token.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ProviderError::invalid_response(
                PROVIDER,
                "token response missing access_token",
            )),
        }
    }
}

#[async_trait]
impl PlaylistProvider for SpotifyClient {
    async fn search_playlists(&self, vibe: &str, limit: u32) -> ProviderResult<Vec<PlaylistItem>> {
        let (Some(id), Some(secret)) = (self.client_id.as_deref(), self.client_secret.as_deref())
        else {
            debug!("Spotify credentials not configured, skipping provider");
            return Ok(Vec::new());
        };

        let limit = limit.clamp(1, MAX_RESULTS);
        let token = self.fetch_access_token(id, secret).await?;

        let url = format!(
            "{}/v1/search?q={}&type=playlist&limit={}",
            self.api_base_url,
            urlencoding::encode(vibe),
            limit
        );
        debug!(url = %url, "Spotify playlist search");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e.to_string()))?;
        let response = check_status(PROVIDER, response)?;

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(PROVIDER, e.to_string()))?;

        let items: Vec<PlaylistItem> = payload
            .playlists
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(PlaylistEntry::into_item)
            .collect();

        info!(count = items.len(), "Spotify playlist search complete");
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    playlists: Option<PlaylistPage>,
}

#[derive(Debug, Deserialize)]
struct PlaylistPage {
    // Spotify pads this array with null entries
    #[serde(default)]
    items: Vec<Option<PlaylistEntry>>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    name: Option<String>,
    external_urls: Option<ExternalUrls>,
    #[serde(default)]
    images: Vec<PlaylistImage>,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistImage {
    url: Option<String>,
}

impl PlaylistEntry {
    /// Convert to a normalized item; entries without a name are dropped
    fn into_item(self) -> Option<PlaylistItem> {
        let name = self.name.filter(|name| !name.is_empty())?;
        Some(PlaylistItem {
            name,
            link: self.external_urls.and_then(|urls| urls.spotify),
            image: self.images.into_iter().find_map(|image| image.url),
        })
    }
}
