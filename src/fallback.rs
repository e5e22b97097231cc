//! Fallback search strategies for the Movies and Places providers
//!
//! Both providers are prone to returning nothing for free-text mood queries,
//! so each gets an ordered list of candidate queries tried until one yields
//! results. Candidate derivation is deterministic: the literal vibe first, a
//! domain-qualified variant second, then genre terms from the mood table.
//!
//! A terminal provider failure (bad credentials, exhausted quota) abandons
//! the remaining candidates immediately; retrying a broken credential with a
//! different search term cannot succeed.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::{CafeItem, Coordinates, MovieItem};
use crate::providers::{CafeProvider, MovieProvider, PlaceCategory};

/// One row of the mood table: if any keyword matches the vibe, the
/// candidates are appended to the search sequence.
#[derive(Debug)]
pub struct MoodBucket {
    pub keywords: &'static [&'static str],
    pub candidates: &'static [&'static str],
}

/// Mood-to-genre mapping, checked in order; the first matching bucket wins
/// and the rest are ignored.
pub const MOOD_BUCKETS: &[MoodBucket] = &[
    MoodBucket {
        keywords: &["cozy", "rainy"],
        candidates: &["romantic comedy", "drama"],
    },
    MoodBucket {
        keywords: &["adventure", "exciting"],
        candidates: &["action", "adventure"],
    },
    MoodBucket {
        keywords: &["scary", "spooky"],
        candidates: &["horror"],
    },
    MoodBucket {
        keywords: &["funny", "comedy"],
        candidates: &["comedy"],
    },
];

/// Genre candidates for a vibe, from the first matching mood bucket
#[must_use]
pub fn mood_candidates(vibe: &str) -> &'static [&'static str] {
    let vibe = vibe.to_lowercase();
    MOOD_BUCKETS
        .iter()
        .find(|bucket| bucket.keywords.iter().any(|keyword| vibe.contains(keyword)))
        .map(|bucket| bucket.candidates)
        .unwrap_or(&[])
}

/// Ordered movie search candidates for a vibe
#[must_use]
pub fn movie_search_terms(vibe: &str) -> Vec<String> {
    let mut terms = vec![vibe.to_string(), format!("{vibe} movie")];
    terms.extend(
        mood_candidates(vibe)
            .iter()
            .map(|candidate| (*candidate).to_string()),
    );
    terms
}

/// Ordered nearby-search strategies for a vibe, keyword paired with a
/// place-category hint
#[must_use]
pub fn cafe_search_plan(vibe: &str) -> Vec<(String, PlaceCategory)> {
    vec![
        (format!("{vibe} cafe"), PlaceCategory::Cafe),
        ("cafe".to_string(), PlaceCategory::Cafe),
        ("coffee".to_string(), PlaceCategory::Cafe),
        ("restaurant".to_string(), PlaceCategory::Restaurant),
    ]
}

/// Movie search with candidate fallback; first non-empty result wins
pub struct MovieFallbackSearch {
    provider: Arc<dyn MovieProvider>,
}

impl MovieFallbackSearch {
    /// Wrap a movie provider
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self { provider }
    }

    /// Try each candidate term until one produces results; exhaustion or a
    /// terminal failure yields an empty list
    pub async fn search(&self, vibe: &str, limit: u32) -> Vec<MovieItem> {
        for term in movie_search_terms(vibe) {
            debug!(term = %term, "trying movie search candidate");
            match self.provider.search_movies(&term, limit).await {
                Ok(items) if !items.is_empty() => {
                    info!(term = %term, count = items.len(), "movie candidate produced results");
                    return items;
                }
                Ok(_) => debug!(term = %term, "movie candidate returned no results"),
                Err(err) if err.is_terminal() => {
                    warn!(error = %err, "terminal movie provider failure, abandoning remaining candidates");
                    return Vec::new();
                }
                Err(err) => {
                    warn!(term = %term, error = %err, "movie candidate failed, trying next");
                }
            }
        }
        debug!("all movie search candidates exhausted");
        Vec::new()
    }
}

/// Nearby-cafe search with strategy fallback; first non-empty result wins
pub struct CafeFallbackSearch {
    provider: Arc<dyn CafeProvider>,
}

impl CafeFallbackSearch {
    /// Wrap a nearby-place provider
    pub fn new(provider: Arc<dyn CafeProvider>) -> Self {
        Self { provider }
    }

    /// Try each keyword/category strategy until one produces results;
    /// exhaustion or a terminal failure yields an empty list
    pub async fn search(&self, vibe: &str, coordinates: Coordinates, limit: u32) -> Vec<CafeItem> {
        for (keyword, category) in cafe_search_plan(vibe) {
            debug!(keyword = %keyword, category = category.as_str(), "trying cafe search strategy");
            match self
                .provider
                .search_nearby(&keyword, category, coordinates, limit)
                .await
            {
                Ok(items) if !items.is_empty() => {
                    info!(keyword = %keyword, count = items.len(), "cafe strategy produced results");
                    return items;
                }
                Ok(_) => debug!(keyword = %keyword, "cafe strategy returned no results"),
                Err(err) if err.is_terminal() => {
                    warn!(error = %err, "terminal places failure, abandoning remaining strategies");
                    return Vec::new();
                }
                Err(err) => {
                    warn!(keyword = %keyword, error = %err, "cafe strategy failed, trying next");
                }
            }
        }
        debug!("all cafe search strategies exhausted");
        Vec::new()
    }
}
