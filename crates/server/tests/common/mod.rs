//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, enabling E2E testing of the HTTP API
//! without TMDB or the release source.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use reelscout_core::{
    config::ServerConfig,
    external_catalog::TmdbConfig,
    testing::{MockExternalCatalog, MockSourceFetcher},
    Config, ExternalCatalog, SearchService, SourceFetcher,
};

/// Re-export fixtures for test convenience
#[allow(unused_imports)]
pub use reelscout_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - Title resolution (MockExternalCatalog)
/// - Release search pages (MockSourceFetcher)
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///     fixture.catalog.add_movie("tt0133093", fixtures::tmdb_movie("The Matrix", 1999)).await;
///
///     let response = fixture.get("/api/v1/torrents/search/tt0133093").await;
///     assert_eq!(response.status, 404);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure TMDB lookups
    pub catalog: Arc<MockExternalCatalog>,
    /// Mock release source - configure result pages
    pub source: Arc<MockSourceFetcher>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    #[allow(dead_code)]
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_timeout(Some(Duration::from_secs(5))).await
    }

    /// Create a test fixture with a custom overall search timeout.
    pub async fn with_timeout(search_timeout: Option<Duration>) -> Self {
        let catalog = Arc::new(MockExternalCatalog::new());
        let source = Arc::new(MockSourceFetcher::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            tmdb: TmdbConfig {
                access_token: Some("e2e-secret-token".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let search = SearchService::new(
            Arc::clone(&catalog) as Arc<dyn ExternalCatalog>,
            Arc::clone(&source) as Arc<dyn SourceFetcher>,
        )
        .with_timeout(search_timeout);

        let state = Arc::new(reelscout_server::state::AppState::new(
            config,
            Arc::new(search),
        ));
        let router = reelscout_server::api::create_router(state);

        Self {
            router,
            catalog,
            source,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}
