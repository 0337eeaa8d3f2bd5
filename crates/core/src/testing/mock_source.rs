//! Mock search surface for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::searcher::{RawDocument, SearchError, SourceFetcher};

/// Mock implementation of the SourceFetcher trait.
///
/// Provides controllable behavior for testing:
/// - Return a configured page for every fetch
/// - Track (title, year) pairs for assertions
/// - Simulate failures and slow responses
#[derive(Debug, Default)]
pub struct MockSourceFetcher {
    /// Page returned by every fetch.
    document: Arc<RwLock<String>>,
    /// Recorded (title, year) fetches.
    fetches: Arc<RwLock<Vec<(String, String)>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// Artificial latency before responding.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockSourceFetcher {
    /// Create a new mock returning an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page returned by subsequent fetches.
    pub async fn set_document(&self, document: impl Into<String>) {
        *self.document.write().await = document.into();
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every fetch by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Get all recorded (title, year) fetches.
    pub async fn recorded_fetches(&self) -> Vec<(String, String)> {
        self.fetches.read().await.clone()
    }

    /// Get the number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }
}

#[async_trait]
impl SourceFetcher for MockSourceFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, title: &str, year: &str) -> Result<RawDocument, SearchError> {
        self.fetches
            .write()
            .await
            .push((title.to_string(), year.to_string()));

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(RawDocument::new(self.document.read().await.clone()))
    }
}
