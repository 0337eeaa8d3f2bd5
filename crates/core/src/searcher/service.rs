//! Search orchestration: resolve, fetch, extract, then rank.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::external_catalog::ExternalCatalog;
use crate::metrics::{CANDIDATES_EXTRACTED, CANDIDATES_RETURNED, SEARCHES_TOTAL, SEARCH_DURATION};

use super::assembler::assemble;
use super::extractor::extract_candidates;
use super::filter::filter_candidates;
use super::grouping::group_candidates;
use super::resolver::TitleResolver;
use super::sort::sort_candidates;
use super::types::{
    MediaKind, ResolvedMedia, ResultSet, SearchError, SearchPolicy, SourceFetcher,
    TorrentCandidate,
};

/// Runs the full release search pipeline for one identifier at a time.
///
/// Stateless between calls; share it behind an `Arc`.
pub struct SearchService {
    resolver: TitleResolver,
    fetcher: Arc<dyn SourceFetcher>,
    timeout: Option<Duration>,
}

impl SearchService {
    pub fn new(catalog: Arc<dyn ExternalCatalog>, fetcher: Arc<dyn SourceFetcher>) -> Self {
        Self {
            resolver: TitleResolver::new(catalog),
            fetcher,
            timeout: None,
        }
    }

    /// Bound the whole search (resolve + fetch) by `timeout`. `None` disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Search releases for `imdb_id` and shape them according to `policy`.
    ///
    /// An empty result set is not an error; callers decide how to report it.
    pub async fn search(
        &self,
        imdb_id: &str,
        kind: MediaKind,
        policy: &SearchPolicy,
    ) -> Result<ResultSet, SearchError> {
        let span = info_span!(
            "search",
            search_id = %Uuid::new_v4(),
            imdb_id = imdb_id,
            kind = kind.as_str()
        );

        async {
            let start = Instant::now();
            let result = match self.timeout {
                Some(limit) => tokio::time::timeout(limit, self.run(imdb_id, kind, policy))
                    .await
                    .unwrap_or(Err(SearchError::Timeout(limit.as_secs()))),
                None => self.run(imdb_id, kind, policy).await,
            };

            let outcome = match &result {
                Ok(set) if set.total > 0 => "found",
                Ok(_) => "empty",
                Err(e) => e.kind(),
            };
            SEARCHES_TOTAL.with_label_values(&[outcome]).inc();
            SEARCH_DURATION
                .with_label_values(&[outcome])
                .observe(start.elapsed().as_secs_f64());

            match &result {
                Ok(set) => info!(
                    query = %set.query,
                    total = set.total,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Search complete"
                ),
                Err(e) => warn!(error = %e, outcome = outcome, "Search failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        imdb_id: &str,
        kind: MediaKind,
        policy: &SearchPolicy,
    ) -> Result<ResultSet, SearchError> {
        let media = self.resolver.resolve(imdb_id, kind).await?;
        let document = self.fetcher.fetch(&media.title, &media.year).await?;

        let candidates = extract_candidates(&document);
        CANDIDATES_EXTRACTED
            .with_label_values(&[])
            .observe(candidates.len() as f64);
        debug!(
            source = self.fetcher.name(),
            extracted = candidates.len(),
            "Candidates extracted"
        );

        let result = rank_candidates(&media, candidates, policy);
        CANDIDATES_RETURNED
            .with_label_values(&[])
            .observe(result.total as f64);
        Ok(result)
    }
}

/// Filter, sort and group already extracted candidates.
pub fn rank_candidates(
    media: &ResolvedMedia,
    candidates: Vec<TorrentCandidate>,
    policy: &SearchPolicy,
) -> ResultSet {
    let filtered = filter_candidates(candidates, policy, media.kind);
    let sorted = sort_candidates(filtered, policy.sort_by, policy.sort_order);
    let groups = group_candidates(
        &sorted,
        policy.group_by_quality,
        policy.group_by_season,
        media.kind,
    );
    assemble(media, sorted, groups)
}
