//! Location resolution
//!
//! Converts a free-text place name into coordinates via the geocoder. Every
//! failure mode collapses to `None`: a missing location match must never
//! take the rest of the plan down with it.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::Coordinates;
use crate::providers::Geocoder;

/// Service for resolving free-text location names
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    /// Wrap a geocoder
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Resolve a location name to coordinates; `None` on no match or any
    /// geocoding failure
    pub async fn resolve(&self, location: &str) -> Option<Coordinates> {
        debug!("Resolving location name: {location}");

        match self.geocoder.geocode(location).await {
            Ok(Some(coordinates)) => {
                debug!(
                    "Resolved '{}' to ({:.4}, {:.4})",
                    location, coordinates.latitude, coordinates.longitude
                );
                Some(coordinates)
            }
            Ok(None) => {
                debug!("No geocoding match for '{location}'");
                None
            }
            Err(err) => {
                warn!(location = %location, error = %err, "geocoding failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::providers::{ProviderError, ProviderResult};

    struct StubGeocoder {
        outcome: ProviderResult<Option<Coordinates>>,
        calls: AtomicUsize,
    }

    impl StubGeocoder {
        fn new(outcome: ProviderResult<Option<Coordinates>>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _location: &str) -> ProviderResult<Option<Coordinates>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(coordinates) => Ok(*coordinates),
                Err(err) => Err(ProviderError::api(err.provider(), err.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let geocoder = Arc::new(StubGeocoder::new(Ok(Some(Coordinates::new(47.60, -122.33)))));
        let resolver = LocationResolver::new(geocoder.clone());

        let resolved = resolver.resolve("Seattle").await;

        assert_eq!(resolved, Some(Coordinates::new(47.60, -122.33)));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_no_match_is_none() {
        let resolver = LocationResolver::new(Arc::new(StubGeocoder::new(Ok(None))));
        assert_eq!(resolver.resolve("Atlantis").await, None);
    }

    #[tokio::test]
    async fn test_resolve_provider_error_is_none() {
        let resolver = LocationResolver::new(Arc::new(StubGeocoder::new(Err(
            ProviderError::network("geocoding", "connection reset"),
        ))));
        assert_eq!(resolver.resolve("Seattle").await, None);
    }
}
