//! Mock external catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::external_catalog::{
    ExternalCatalog, ExternalCatalogError, FindResult, TmdbMovie, TmdbSeries,
};

/// Mock implementation of the ExternalCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configured movies/series keyed by IMDb id
/// - Track lookups for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use reelscout_core::testing::{MockExternalCatalog, fixtures};
///
/// let catalog = MockExternalCatalog::new();
/// catalog.add_movie("tt0133093", fixtures::tmdb_movie("The Matrix", 1999)).await;
///
/// let found = catalog.find_by_imdb_id("tt0133093").await?;
/// assert_eq!(found.movie_results.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockExternalCatalog {
    /// TMDB movies by IMDb id.
    movies: Arc<RwLock<HashMap<String, Vec<TmdbMovie>>>>,
    /// TMDB series by IMDb id.
    series: Arc<RwLock<HashMap<String, Vec<TmdbSeries>>>>,
    /// Recorded lookups.
    queries: Arc<RwLock<Vec<String>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<ExternalCatalogError>>>,
}

impl Default for MockExternalCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExternalCatalog {
    /// Create a new empty mock external catalog.
    pub fn new() -> Self {
        Self {
            movies: Arc::new(RwLock::new(HashMap::new())),
            series: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Register a movie under an IMDb id.
    pub async fn add_movie(&self, imdb_id: &str, movie: TmdbMovie) {
        self.movies
            .write()
            .await
            .entry(imdb_id.to_string())
            .or_default()
            .push(movie);
    }

    /// Register a TV series under an IMDb id.
    pub async fn add_series(&self, imdb_id: &str, series: TmdbSeries) {
        self.series
            .write()
            .await
            .entry(imdb_id.to_string())
            .or_default()
            .push(series);
    }

    /// Remove all registered entries.
    pub async fn clear(&self) {
        self.movies.write().await.clear();
        self.series.write().await.clear();
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// IMDb ids looked up so far, in order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }

    /// Get the number of lookups performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: ExternalCatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }
}

#[async_trait]
impl ExternalCatalog for MockExternalCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<FindResult, ExternalCatalogError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.queries.write().await.push(imdb_id.to_string());

        Ok(FindResult {
            movie_results: self
                .movies
                .read()
                .await
                .get(imdb_id)
                .cloned()
                .unwrap_or_default(),
            tv_results: self
                .series
                .read()
                .await
                .get(imdb_id)
                .cloned()
                .unwrap_or_default(),
        })
    }
}
