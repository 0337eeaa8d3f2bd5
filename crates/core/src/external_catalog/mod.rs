//! External catalog integration.
//!
//! Resolves external identifiers (IMDb ids) to canonical titles through
//! TMDB's `find` endpoint.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with external catalogs.
#[derive(Debug, Error)]
pub enum ExternalCatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for metadata providers that can look titles up by external id.
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Find movie and TV entries matching an IMDb id.
    ///
    /// Both interpretations are returned; callers pick the list they need.
    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<FindResult, ExternalCatalogError>;
}
