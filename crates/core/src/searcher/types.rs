//! Types for the release search pipeline.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use super::quality::QualityTier;

/// Whether an identifier refers to a movie or a series.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Movie,
    Series,
}

impl MediaKind {
    /// Parse the `type` request parameter (`movie`, `tv` or `series`).
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "tv" | "series" => Some(Self::Series),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    pub fn is_series(self) -> bool {
        self == Self::Series
    }
}

/// Canonical title resolved from an external identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub title: String,
    /// Release or first-air year, empty when unknown.
    pub year: String,
    pub kind: MediaKind,
}

impl ResolvedMedia {
    /// `"<title> (<year>)"`, echoed back to callers.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

/// Raw text returned by the search surface. Consumed once by extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument(String);

impl RawDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RawDocument {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A release candidate extracted from the search surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentCandidate {
    /// Release title as listed by the source.
    pub title: String,
    /// Size as listed (e.g. "1.46 GB"), empty if absent.
    pub size: String,
    pub seeders: u32,
    pub leechers: u32,
    pub quality: QualityTier,
    pub hdr: bool,
    pub hevc: bool,
    /// Magnet URI, empty if absent.
    #[serde(default)]
    pub magnet_link: String,
    /// Direct .torrent download link, empty if absent.
    #[serde(default)]
    pub torrent_link: String,
    /// Date added (YYYY-MM-DD), empty if absent.
    #[serde(default)]
    pub added_date: String,
}

/// Sort key for search results.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Seeders,
    Size,
    Date,
}

impl SortKey {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "seeders" => Some(Self::Seeders),
            "size" => Some(Self::Size),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Caller-supplied filter, sort and grouping preferences for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPolicy {
    /// Allowed tiers; empty means no restriction.
    #[serde(default)]
    pub qualities: HashSet<QualityTier>,
    #[serde(default)]
    pub min_quality: Option<QualityTier>,
    #[serde(default)]
    pub max_quality: Option<QualityTier>,
    #[serde(default)]
    pub exclude_qualities: HashSet<QualityTier>,
    #[serde(default)]
    pub hdr: Option<bool>,
    #[serde(default)]
    pub hevc: Option<bool>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub group_by_quality: bool,
    #[serde(default)]
    pub group_by_season: bool,
    /// Season to keep (series only).
    #[serde(default)]
    pub season: Option<u32>,
}

/// Candidates partitioned by group key, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateGroups {
    entries: Vec<(String, Vec<TorrentCandidate>)>,
}

impl CandidateGroups {
    pub(crate) fn push(&mut self, key: String, candidate: TorrentCandidate) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(candidate),
            None => self.entries.push((key, vec![candidate])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[TorrentCandidate]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, members)| members.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TorrentCandidate])> {
        self.entries
            .iter()
            .map(|(k, members)| (k.as_str(), members.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CandidateGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, members)| (k, members)))
    }
}

/// Final, read-only output of a search.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    /// `"<title> (<year>)"` of the resolved media.
    pub query: String,
    /// Number of results after filtering.
    pub total: usize,
    pub results: Vec<TorrentCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<CandidateGroups>,
}

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to resolve title: {0}")]
    Resolution(String),

    #[error("Failed to fetch search results: {0}")]
    Fetch(String),

    #[error("Search timed out after {0}s")]
    Timeout(u64),
}

impl SearchError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resolution(_) => "resolution_error",
            Self::Fetch(_) => "fetch_error",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Trait for release search surfaces.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Source name for logging/metrics.
    fn name(&self) -> &str;

    /// Run one search for `title` (and `year`, if non-empty) and return the raw page.
    async fn fetch(&self, title: &str, year: &str) -> Result<RawDocument, SearchError>;
}
