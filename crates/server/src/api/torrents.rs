//! Release search API handler.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;
use tracing::debug;

use reelscout_core::searcher::CandidateGroups;
use reelscout_core::{
    MediaKind, QualityTier, SearchError, SearchPolicy, SortKey, SortOrder, TorrentCandidate,
};

use crate::state::AppState;

static IMDB_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tt\d{5,}$").unwrap());

// ============================================================================
// Request/Response types
// ============================================================================

/// Query parameters. Everything is read as text so malformed values can be
/// ignored instead of rejecting the request.
#[derive(Debug, Default)]
pub struct SearchParams {
    pub media_type: Option<String>,
    pub quality: Option<String>,
    pub min_quality: Option<String>,
    pub max_quality: Option<String>,
    pub exclude_qualities: Option<String>,
    pub hdr: Option<String>,
    pub hevc: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub group_by_quality: Option<String>,
    pub group_by_season: Option<String>,
    pub season: Option<String>,
}

impl SearchParams {
    /// Collect known parameters from raw query pairs. When a key repeats, the
    /// first value wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "type" => &mut params.media_type,
                "quality" => &mut params.quality,
                "minQuality" => &mut params.min_quality,
                "maxQuality" => &mut params.max_quality,
                "excludeQualities" => &mut params.exclude_qualities,
                "hdr" => &mut params.hdr,
                "hevc" => &mut params.hevc,
                "sortBy" => &mut params.sort_by,
                "sortOrder" => &mut params.sort_order,
                "groupByQuality" => &mut params.group_by_quality,
                "groupBySeason" => &mut params.group_by_season,
                "season" => &mut params.season,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: SearchData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    pub imdb_id: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub query: String,
    pub total: usize,
    pub grouped: bool,
    pub results: Vec<TorrentCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<CandidateGroups>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub imdb_id: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub query: String,
    pub total: usize,
    pub grouped: bool,
    pub results: Vec<TorrentCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn search_error_status(err: &SearchError) -> StatusCode {
    match err {
        SearchError::Resolution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SearchError::Fetch(_) => StatusCode::BAD_GATEWAY,
        SearchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    }
}

// ============================================================================
// Parameter parsing
// ============================================================================

/// Boolean parsing with the same accepted spellings as Go's `strconv.ParseBool`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Comma separated tier names; unknown names are dropped.
pub fn parse_tier_list(value: &str) -> HashSet<QualityTier> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(QualityTier::from_name)
        .collect()
}

/// A ranked tier usable as a min/max bound.
fn parse_bound(value: &str) -> Option<QualityTier> {
    QualityTier::from_name(value).filter(|tier| tier.rank().is_some())
}

/// Build a search policy, leaving malformed parameters unset.
pub fn build_policy(params: &SearchParams) -> SearchPolicy {
    let flag = |value: &Option<String>| value.as_deref().and_then(parse_bool);

    SearchPolicy {
        qualities: params
            .quality
            .as_deref()
            .map(parse_tier_list)
            .unwrap_or_default(),
        min_quality: params.min_quality.as_deref().and_then(parse_bound),
        max_quality: params.max_quality.as_deref().and_then(parse_bound),
        exclude_qualities: params
            .exclude_qualities
            .as_deref()
            .map(parse_tier_list)
            .unwrap_or_default(),
        hdr: flag(&params.hdr),
        hevc: flag(&params.hevc),
        sort_by: params
            .sort_by
            .as_deref()
            .and_then(SortKey::from_param)
            .unwrap_or_default(),
        sort_order: params
            .sort_order
            .as_deref()
            .and_then(SortOrder::from_param)
            .unwrap_or_default(),
        group_by_quality: flag(&params.group_by_quality) == Some(true),
        group_by_season: flag(&params.group_by_season) == Some(true),
        season: params
            .season
            .as_deref()
            .and_then(|s| s.trim().parse().ok()),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/torrents/search/{imdb_id}
///
/// Resolve the IMDb id, search the release source and return ranked results.
pub async fn search_by_imdb_id(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = SearchParams::from_pairs(pairs);

    if !IMDB_ID_RE.is_match(&imdb_id) {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid IMDb ID '{}': expected tt followed by digits", imdb_id),
        );
    }

    let media_type = params
        .media_type
        .as_deref()
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "movie".to_string());
    let Some(kind) = MediaKind::from_param(&media_type) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid type '{}': expected movie, tv or series", media_type),
        );
    };

    let policy = build_policy(&params);
    debug!(imdb_id = %imdb_id, kind = kind.as_str(), policy = ?policy, "Release search request");

    let result = match state.search().search(&imdb_id, kind, &policy).await {
        Ok(result) => result,
        Err(e) => return error_response(search_error_status(&e), e.to_string()),
    };

    let grouped = result.groups.is_some();
    let season = policy.season.filter(|_| kind.is_series());

    if result.total == 0 {
        return (
            StatusCode::NOT_FOUND,
            Json(NotFoundResponse {
                imdb_id,
                media_type,
                query: result.query,
                total: 0,
                grouped,
                results: Vec::new(),
                season,
                error: "No torrents found for this IMDb ID".to_string(),
            }),
        )
            .into_response();
    }

    Json(SearchResponse {
        success: true,
        data: SearchData {
            imdb_id,
            media_type,
            query: result.query,
            total: result.total,
            grouped,
            results: result.results,
            groups: result.groups,
            season,
        },
    })
    .into_response()
}
