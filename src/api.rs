//! HTTP API surface
//!
//! Exposes the planner over three routes:
//! - `POST /plan` — plan a recommendation bundle for a vibe query
//! - `GET /about` — service metadata
//! - `GET /validate` — configured owner contact (pairing handshake)
//!
//! When a bearer token is configured every route requires it; without one
//! the gate is a pass-through.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing::error;

use crate::config::AuthConfig;
use crate::error::PlannerError;
use crate::models::VibeQuery;
use crate::planner::VibePlanner;

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<VibePlanner>,
    pub auth: AuthConfig,
}

impl AppState {
    /// Bundle the planner with its auth settings
    pub fn new(planner: Arc<VibePlanner>, auth: AuthConfig) -> Self {
        Self { planner, auth }
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/plan", post(plan))
        .route("/about", get(about))
        .route("/validate", get(validate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ))
        .with_state(state)
}

/// Static bearer-token gate; pass-through when no token is configured
async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.auth.bearer_token.as_deref() else {
        return next.run(request).await;
    };

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == expected);

    if authorized {
        next.run(request).await
    } else {
        error_response(StatusCode::UNAUTHORIZED, "invalid bearer token")
    }
}

async fn plan(State(state): State<AppState>, Json(query): Json<VibeQuery>) -> Response {
    match state.planner.plan(query).await {
        Ok(response) => Json(response).into_response(),
        Err(err @ PlannerError::Validation { .. }) => {
            error_response(StatusCode::BAD_REQUEST, &err.user_message())
        }
        Err(err) => {
            error!(error = %err, "vibe planning failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.user_message())
        }
    }
}

async fn about() -> Json<Value> {
    Json(json!({
        "name": "VibePlanner",
        "description": "Mood-based recommendations for music, recipes, books, movies and nearby cafes",
        "version": crate::VERSION,
    }))
}

async fn validate(State(state): State<AppState>) -> Response {
    match state.auth.owner_contact.as_deref() {
        Some(contact) => contact.to_string().into_response(),
        None => error_response(StatusCode::NOT_FOUND, "owner contact not configured"),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tower::ServiceExt;

    use crate::models::{
        BookItem, CafeItem, Coordinates, MovieItem, PlaylistItem, VideoItem,
    };
    use crate::providers::{
        BookProvider, CafeProvider, Geocoder, MovieProvider, PlaceCategory, PlaylistProvider,
        ProviderResult, VideoProvider,
    };

    /// Every provider empty; enough for boundary tests
    struct EmptyProviders;

    #[async_trait]
    impl PlaylistProvider for EmptyProviders {
        async fn search_playlists(
            &self,
            _vibe: &str,
            _limit: u32,
        ) -> ProviderResult<Vec<PlaylistItem>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl VideoProvider for EmptyProviders {
        async fn search_recipe_videos(
            &self,
            _vibe: &str,
            _limit: u32,
        ) -> ProviderResult<Vec<VideoItem>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl BookProvider for EmptyProviders {
        async fn search_books(&self, _vibe: &str, _limit: u32) -> ProviderResult<Vec<BookItem>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl MovieProvider for EmptyProviders {
        async fn search_movies(&self, _term: &str, _limit: u32) -> ProviderResult<Vec<MovieItem>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl CafeProvider for EmptyProviders {
        async fn search_nearby(
            &self,
            _keyword: &str,
            _category: PlaceCategory,
            _coordinates: Coordinates,
            _limit: u32,
        ) -> ProviderResult<Vec<CafeItem>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl Geocoder for EmptyProviders {
        async fn geocode(&self, _location: &str) -> ProviderResult<Option<Coordinates>> {
            Ok(None)
        }
    }

    fn test_state(auth: AuthConfig) -> AppState {
        let planner = Arc::new(VibePlanner::new(
            Arc::new(EmptyProviders),
            Arc::new(EmptyProviders),
            Arc::new(EmptyProviders),
            Arc::new(EmptyProviders),
            Arc::new(EmptyProviders),
            Arc::new(EmptyProviders),
            5,
        ));
        AppState::new(planner, auth)
    }

    async fn send(
        router: Router,
        request: axum::http::Request<axum::body::Body>,
    ) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, body)
    }

    fn plan_request(body: &str) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/plan")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_plan_returns_aggregated_response() {
        let router = router(test_state(AuthConfig::default()));
        let (status, body) = send(router, plan_request(r#"{"description": "calm"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vibe"], "calm");
        assert_eq!(body["location"]["provenance"], "not-requested");
        assert_eq!(body["counts"]["music"], 0);
    }

    #[tokio::test]
    async fn test_plan_rejects_blank_description() {
        let router = router(test_state(AuthConfig::default()));
        let (status, body) = send(router, plan_request(r#"{"description": "  "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid input"));
    }

    #[tokio::test]
    async fn test_bearer_gate_rejects_missing_and_wrong_token() {
        let auth = AuthConfig {
            bearer_token: Some("sesame".to_string()),
            owner_contact: None,
        };

        let (status, _) = send(
            router(test_state(auth.clone())),
            plan_request(r#"{"description": "calm"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let mut request = plan_request(r#"{"description": "calm"}"#);
        request.headers_mut().insert(
            header::AUTHORIZATION,
            "Bearer wrong".parse().unwrap(),
        );
        let (status, _) = send(router(test_state(auth)), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bearer_gate_accepts_configured_token() {
        let auth = AuthConfig {
            bearer_token: Some("sesame".to_string()),
            owner_contact: None,
        };
        let mut request = plan_request(r#"{"description": "calm"}"#);
        request.headers_mut().insert(
            header::AUTHORIZATION,
            "Bearer sesame".parse().unwrap(),
        );
        let (status, _) = send(router(test_state(auth)), request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_about_reports_service_metadata() {
        let router = router(test_state(AuthConfig::default()));
        let request = axum::http::Request::builder()
            .uri("/about")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "VibePlanner");
    }

    #[tokio::test]
    async fn test_validate_returns_owner_contact() {
        let auth = AuthConfig {
            bearer_token: None,
            owner_contact: Some("owner@example.com".to_string()),
        };
        let router = router(test_state(auth));
        let request = axum::http::Request::builder()
            .uri("/validate")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("owner@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_validate_without_owner_contact_is_not_found() {
        let router = router(test_state(AuthConfig::default()));
        let request = axum::http::Request::builder()
            .uri("/validate")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, _) = send(router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
