//! Resolution of external identifiers to canonical titles.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::external_catalog::{ExternalCatalog, FindResult};

use super::types::{MediaKind, ResolvedMedia, SearchError};

/// Resolves IMDb ids to a (title, year) pair via an external catalog.
pub struct TitleResolver {
    catalog: Arc<dyn ExternalCatalog>,
}

impl TitleResolver {
    pub fn new(catalog: Arc<dyn ExternalCatalog>) -> Self {
        Self { catalog }
    }

    /// Look up `imdb_id` and pick the first result of the requested kind.
    pub async fn resolve(&self, imdb_id: &str, kind: MediaKind) -> Result<ResolvedMedia, SearchError> {
        let found = self.catalog.find_by_imdb_id(imdb_id).await.map_err(|e| {
            warn!(imdb_id = imdb_id, catalog = self.catalog.name(), error = %e, "Title lookup failed");
            SearchError::Resolution(e.to_string())
        })?;

        let media = select_media(&found, kind).ok_or_else(|| {
            SearchError::Resolution(format!("no {} found for {}", kind.as_str(), imdb_id))
        })?;

        debug!(imdb_id = imdb_id, title = %media.title, year = %media.year, "Resolved title");
        Ok(media)
    }
}

/// Pick the first result matching `kind`, preferring its original-language title.
pub fn select_media(found: &FindResult, kind: MediaKind) -> Option<ResolvedMedia> {
    let (title, year) = match kind {
        MediaKind::Movie => {
            let movie = found.movie_results.first()?;
            (movie.preferred_title()?, movie.year())
        }
        MediaKind::Series => {
            let series = found.tv_results.first()?;
            (series.preferred_title()?, series.year())
        }
    };

    Some(ResolvedMedia {
        title: title.to_string(),
        year,
        kind,
    })
}
