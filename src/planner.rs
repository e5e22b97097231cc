//! The vibe planner — multi-provider aggregation orchestrator
//!
//! This module coordinates the whole recommendation bundle:
//! 1. Validate the vibe description
//! 2. Fetch music, videos, books and movies independently, in parallel
//! 3. Resolve effective coordinates (explicit beats geocoded)
//! 4. Fetch nearby cafes when coordinates are available
//! 5. Assemble the aggregated response with per-provider counts
//!
//! Every provider call is isolated: a failing provider degrades to an empty
//! slot and never takes the other providers' results down with it. The only
//! way the whole call fails is a blank vibe description.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::fallback::{CafeFallbackSearch, MovieFallbackSearch};
use crate::location_resolver::LocationResolver;
use crate::models::{AggregatedResponse, LocationResolution, VibeQuery};
use crate::providers::{
    BookProvider, CafeProvider, GeocodingClient, Geocoder, GoogleBooksClient, GooglePlacesClient,
    MovieProvider, OmdbClient, PlaylistProvider, ProviderResult, SpotifyClient, VideoProvider,
    YouTubeClient,
};
use crate::Result;

/// Run one provider call and contain its failure.
///
/// Applied uniformly to every independent provider call site; a failing
/// provider contributes an empty list and a warn log line, nothing more.
async fn isolate<T>(
    provider: &'static str,
    call: impl Future<Output = ProviderResult<Vec<T>>>,
) -> Vec<T> {
    match call.await {
        Ok(items) => items,
        Err(err) => {
            warn!(provider = provider, error = %err, "provider failed, degrading to empty result");
            Vec::new()
        }
    }
}

/// Multi-provider aggregation orchestrator
pub struct VibePlanner {
    music: Arc<dyn PlaylistProvider>,
    videos: Arc<dyn VideoProvider>,
    books: Arc<dyn BookProvider>,
    movies: MovieFallbackSearch,
    cafes: CafeFallbackSearch,
    resolver: LocationResolver,
    result_limit: u32,
}

impl VibePlanner {
    /// Assemble a planner from provider implementations
    pub fn new(
        music: Arc<dyn PlaylistProvider>,
        videos: Arc<dyn VideoProvider>,
        books: Arc<dyn BookProvider>,
        movies: Arc<dyn MovieProvider>,
        cafes: Arc<dyn CafeProvider>,
        geocoder: Arc<dyn Geocoder>,
        result_limit: u32,
    ) -> Self {
        Self {
            music,
            videos,
            books,
            movies: MovieFallbackSearch::new(movies),
            cafes: CafeFallbackSearch::new(cafes),
            resolver: LocationResolver::new(geocoder),
            result_limit,
        }
    }

    /// Build a planner with the real provider clients from configuration
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http.timeout_seconds))
            .user_agent(&config.http.user_agent)
            .build()
            .map_err(|e| PlannerError::internal(format!("failed to create HTTP client: {e}")))?;

        let providers = &config.providers;
        Ok(Self::new(
            Arc::new(SpotifyClient::new(
                client.clone(),
                providers.spotify_client_id.clone(),
                providers.spotify_client_secret.clone(),
            )),
            Arc::new(YouTubeClient::new(
                client.clone(),
                providers.youtube_api_key.clone(),
            )),
            Arc::new(GoogleBooksClient::new(client.clone())),
            Arc::new(OmdbClient::new(
                client.clone(),
                providers.omdb_api_key.clone(),
            )),
            Arc::new(GooglePlacesClient::new(
                client.clone(),
                providers.google_maps_api_key.clone(),
            )),
            Arc::new(GeocodingClient::new(
                client,
                providers.google_maps_api_key.clone(),
            )),
            config.defaults.result_limit,
        ))
    }

    /// Plan a recommendation bundle for a vibe query.
    ///
    /// Fails only on a blank description; every provider failure degrades to
    /// an empty slot in the response.
    pub async fn plan(&self, query: VibeQuery) -> Result<AggregatedResponse> {
        let vibe = query.description.trim();
        if vibe.is_empty() {
            return Err(PlannerError::validation(
                "vibe description must not be blank",
            ));
        }
        let vibe = vibe.to_string();
        let limit = self.result_limit;
        info!(vibe = %vibe, "planning recommendations");

        // The four vibe-only providers are independent of each other
        let (music, videos, books, movies) = tokio::join!(
            isolate("spotify", self.music.search_playlists(&vibe, limit)),
            isolate("youtube", self.videos.search_recipe_videos(&vibe, limit)),
            isolate("google-books", self.books.search_books(&vibe, limit)),
            self.movies.search(&vibe, limit),
        );

        // Cafes depend on coordinates, so they run after resolution
        let location = self.resolve_location(&query).await;
        let cafes = match location.coordinates {
            Some(coordinates) => self.cafes.search(&vibe, coordinates, limit).await,
            None => Vec::new(),
        };

        let counts = AggregatedResponse::count_slots(
            music.len(),
            videos.len(),
            books.len(),
            movies.len(),
            cafes.len(),
        );
        info!(
            music = music.len(),
            videos = videos.len(),
            books = books.len(),
            movies = movies.len(),
            cafes = cafes.len(),
            "assembled recommendation bundle"
        );

        Ok(AggregatedResponse {
            vibe,
            music,
            videos,
            books,
            movies,
            cafes,
            location,
            counts,
            generated_at: Utc::now(),
        })
    }

    /// Determine effective coordinates and their provenance.
    ///
    /// Explicit coordinates always win and suppress geocoding entirely; a
    /// partial pair (one half missing) counts as absent and falls through to
    /// geocoding of the location name, if one was given.
    async fn resolve_location(&self, query: &VibeQuery) -> LocationResolution {
        if let Some(coordinates) = query.explicit_coordinates() {
            return LocationResolution::provided(query.location.clone(), coordinates);
        }

        match query.trimmed_location() {
            Some(location) => match self.resolver.resolve(location).await {
                Some(coordinates) => LocationResolution::geocoded(location, coordinates),
                None => LocationResolution::geocode_failed(location),
            },
            None => LocationResolution::not_requested(),
        }
    }
}
