//! YouTube recipe video search client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{ProviderError, ProviderResult, VideoProvider, check_status};
use crate::models::VideoItem;

const PROVIDER: &str = "youtube";
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const MAX_RESULTS: u32 = 50;

/// YouTube Data API v3 client, scoped to recipe video search
pub struct YouTubeClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeClient {
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
impl VideoProvider for YouTubeClient {
    async fn search_recipe_videos(
        &self,
        vibe: &str,
        limit: u32,
    ) -> ProviderResult<Vec<VideoItem>> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("YouTube API key not configured, skipping provider");
            return Ok(Vec::new());
        };

        let limit = limit.clamp(1, MAX_RESULTS);
        let url = format!(
            "{}/youtube/v3/search?part=snippet&q={}&type=video&maxResults={}&key={}",
            self.base_url,
            urlencoding::encode(&format!("{vibe} recipe")),
            limit,
            api_key
        );
        debug!("YouTube recipe search for vibe '{vibe}'");

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

        let items: Vec<VideoItem> = payload
            .items
            .into_iter()
            .filter_map(SearchItem::into_item)
            .collect();

        info!(count = items.len(), "YouTube recipe search complete");
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: Option<VideoId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct VideoId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
}

impl SearchItem {
    /// Convert to a normalized item; both a video id and a title are required
    fn into_item(self) -> Option<VideoItem> {
        let video_id = self.id.and_then(|id| id.video_id)?;
        let title = self.snippet.and_then(|snippet| snippet.title)?;
        Some(VideoItem {
            title,
            link: format!("https://www.youtube.com/watch?v={video_id}"),
        })
    }
}
