//! HTTP search surface fetcher.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::SourceConfig;
use crate::metrics::{EXTERNAL_SERVICE_DURATION, EXTERNAL_SERVICE_REQUESTS};

use super::types::{RawDocument, SearchError, SourceFetcher};

/// Fetches search result pages from a tracker's HTML search endpoint.
pub struct HttpSourceFetcher {
    client: Client,
    config: SourceConfig,
}

impl HttpSourceFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: SourceConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Build the search URL for an already composed query string.
    fn build_search_url(&self, query: &str) -> String {
        format!(
            "{}{}?{}={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.search_path,
            self.config.query_param,
            urlencoding::encode(query)
        )
    }

    async fn get_page(&self, url: &str) -> Result<RawDocument, SearchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Fetch(format!("request timed out: {}", e))
            } else {
                SearchError::Fetch(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Fetch(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Fetch(format!("Failed to read response body: {}", e)))?;

        Ok(RawDocument::new(body))
    }
}

/// `"<title> <year>"`, or just the title when the year is unknown.
pub fn build_search_query(title: &str, year: &str) -> String {
    let year = year.trim();
    if year.is_empty() {
        title.trim().to_string()
    } else {
        format!("{} {}", title.trim(), year)
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    fn name(&self) -> &str {
        "source"
    }

    async fn fetch(&self, title: &str, year: &str) -> Result<RawDocument, SearchError> {
        let query = build_search_query(title, year);
        let url = self.build_search_url(&query);
        debug!(query = %query, url = %url, "Fetching search page");

        let start = Instant::now();
        let result = self.get_page(&url).await;

        EXTERNAL_SERVICE_DURATION
            .with_label_values(&["source", "search"])
            .observe(start.elapsed().as_secs_f64());
        EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&["source", "search", if result.is_ok() { "success" } else { "error" }])
            .inc();

        match &result {
            Ok(document) => debug!(bytes = document.len(), "Fetched search page"),
            Err(e) => warn!(error = %e, query = %query, "Search page fetch failed"),
        }

        result
    }
}
