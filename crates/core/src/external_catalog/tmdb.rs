//! TMDB (The Movie Database) API client.
//!
//! Authenticates either with a v4 read access token (sent as a bearer token)
//! or with a v3 API key (sent as the `api_key` query parameter).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::FindResult;
use super::{ExternalCatalog, ExternalCatalogError};
use crate::metrics::{EXTERNAL_SERVICE_DURATION, EXTERNAL_SERVICE_REQUESTS};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// v4 read access token, sent as `Authorization: Bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// v3 API key, used when no access token is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Language for localized titles.
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "crate::config::default_timeout")]
    pub timeout_secs: u32,
}

impl TmdbConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn has_credentials(&self) -> bool {
        non_empty(&self.access_token).is_some() || non_empty(&self.api_key).is_some()
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_key: None,
            base_url: None,
            language: default_language(),
            timeout_secs: crate::config::default_timeout(),
        }
    }
}

fn default_language() -> String {
    "ru-RU".to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
enum Credential {
    Bearer(String),
    ApiKey(String),
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    language: String,
    credential: Credential,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, ExternalCatalogError> {
        let credential = match (non_empty(&config.access_token), non_empty(&config.api_key)) {
            (Some(token), _) => Credential::Bearer(token.to_string()),
            (None, Some(key)) => Credential::ApiKey(key.to_string()),
            (None, None) => {
                return Err(ExternalCatalogError::NotConfigured(
                    "TMDB access token or API key is required".to_string(),
                ))
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            language: config.language,
            credential,
        })
    }

    fn find_request(&self, imdb_id: &str) -> RequestBuilder {
        let url = format!("{}/find/{}", self.base_url, urlencoding::encode(imdb_id));

        let request = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[("external_source", "imdb_id"), ("language", self.language.as_str())]);

        match &self.credential {
            Credential::Bearer(token) => request.bearer_auth(token),
            Credential::ApiKey(key) => request.query(&[("api_key", key)]),
        }
    }

    async fn send_find(&self, imdb_id: &str) -> Result<FindResult, ExternalCatalogError> {
        let response = self.find_request(imdb_id).send().await?;

        let status = response.status();
        if status == 401 {
            return Err(ExternalCatalogError::NotConfigured(
                "Invalid TMDB credentials".to_string(),
            ));
        }
        if status == 404 {
            return Err(ExternalCatalogError::NotFound(format!(
                "IMDb ID {}",
                imdb_id
            )));
        }
        if status == 429 {
            return Err(ExternalCatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExternalCatalogError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        response.json().await.map_err(|e| {
            ExternalCatalogError::ParseError(format!("Failed to parse find response: {}", e))
        })
    }
}

#[async_trait]
impl ExternalCatalog for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<FindResult, ExternalCatalogError> {
        debug!(imdb_id = imdb_id, "TMDB find by external id");

        let start = Instant::now();
        let result = self.send_find(imdb_id).await;

        EXTERNAL_SERVICE_DURATION
            .with_label_values(&["tmdb", "find"])
            .observe(start.elapsed().as_secs_f64());
        EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&["tmdb", "find", if result.is_ok() { "success" } else { "error" }])
            .inc();

        if let Ok(found) = &result {
            debug!(
                imdb_id = imdb_id,
                movies = found.movie_results.len(),
                series = found.tv_results.len(),
                "TMDB find complete"
            );
        }

        result
    }
}
