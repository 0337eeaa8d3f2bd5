//! Search pipeline integration tests.
//!
//! These tests drive `SearchService` end to end with mock collaborators:
//! - Title resolution for movies and series
//! - Extraction from a realistic results page
//! - Filtering, sorting and grouping policies
//! - Error propagation and the overall timeout

use std::sync::Arc;
use std::time::Duration;

use reelscout_core::{
    external_catalog::{ExternalCatalogError, TmdbSeries},
    searcher::{
        MediaKind, QualityTier, SearchError, SearchPolicy, SearchService, SortKey, SortOrder,
    },
    testing::{fixtures, MockExternalCatalog, MockSourceFetcher},
};

/// Test helper wiring a service to mocks.
struct TestHarness {
    service: SearchService,
    catalog: Arc<MockExternalCatalog>,
    source: Arc<MockSourceFetcher>,
}

impl TestHarness {
    async fn new() -> Self {
        let catalog = Arc::new(MockExternalCatalog::new());
        let source = Arc::new(MockSourceFetcher::new());
        let service = SearchService::new(catalog.clone(), source.clone())
            .with_timeout(Some(Duration::from_secs(5)));

        catalog
            .add_movie("tt0133093", fixtures::tmdb_movie("The Matrix", 1999))
            .await;
        catalog
            .add_series(
                "tt0903747",
                TmdbSeries {
                    id: 1396,
                    name: "Во все тяжкие".to_string(),
                    original_name: Some("Breaking Bad".to_string()),
                    first_air_date: Some("2008-01-20".to_string()),
                },
            )
            .await;

        Self {
            service,
            catalog,
            source,
        }
    }

    async fn with_rows(rows: &[String]) -> Self {
        let harness = Self::new().await;
        harness.source.set_document(fixtures::html_page(rows)).await;
        harness
    }
}

fn movie_rows() -> Vec<String> {
    vec![
        fixtures::html_row("The Matrix (1999) BDRip 1080p", "14.5 GB", 120, 8),
        fixtures::html_row("The Matrix (1999) UHD 2160p HDR HEVC", "58.1 GB", 45, 12),
        fixtures::html_row("The Matrix (1999) WEB-DL 720p", "4.37 GB", 60, 2),
        fixtures::html_row("The Matrix (1999) DVDRip", "1.46 GB", 200, 1),
        fixtures::html_row("The Matrix (1999) 480p", "700 MB", 3, 0),
    ]
}

fn series_rows() -> Vec<String> {
    vec![
        fixtures::html_row("Breaking Bad S01 1080p", "20 GB", 30, 1),
        fixtures::html_row("Breaking Bad S02 720p", "12 GB", 80, 5),
        fixtures::html_row("Breaking Bad (Сезон: 2) 1080p", "25 GB", 10, 0),
        fixtures::html_row("Breaking Bad Complete Series 1080p", "150 GB", 55, 9),
    ]
}

fn titles(set: &reelscout_core::ResultSet) -> Vec<&str> {
    set.results.iter().map(|c| c.title.as_str()).collect()
}

#[tokio::test]
async fn test_default_policy_returns_all_by_seeders() {
    let harness = TestHarness::with_rows(&movie_rows()).await;

    let result = harness
        .service
        .search("tt0133093", MediaKind::Movie, &SearchPolicy::default())
        .await
        .unwrap();

    assert_eq!(result.query, "The Matrix (1999)");
    assert_eq!(result.total, 5);
    assert!(result.groups.is_none());
    assert!(result.results.windows(2).all(|w| w[0].seeders >= w[1].seeders));
    assert_eq!(result.results[0].title, "The Matrix (1999) DVDRip");
    assert_eq!(result.results[0].quality, QualityTier::Unknown);

    let first = &result.results[0];
    assert!(first.magnet_link.starts_with("magnet:?xt=urn:btih:"));
    assert!(first.torrent_link.starts_with("/download.php"));

    assert_eq!(harness.catalog.recorded_queries().await, vec!["tt0133093"]);
    assert_eq!(
        harness.source.recorded_fetches().await,
        vec![("The Matrix".to_string(), "1999".to_string())]
    );
}

#[tokio::test]
async fn test_min_quality_with_hdr_preference() {
    let harness = TestHarness::with_rows(&movie_rows()).await;
    let policy = SearchPolicy {
        min_quality: Some(QualityTier::P1080),
        hdr: Some(false),
        ..Default::default()
    };

    let result = harness
        .service
        .search("tt0133093", MediaKind::Movie, &policy)
        .await
        .unwrap();

    assert_eq!(titles(&result), vec!["The Matrix (1999) BDRip 1080p"]);
}

#[tokio::test]
async fn test_size_ascending_uses_byte_values() {
    let harness = TestHarness::with_rows(&movie_rows()).await;
    let policy = SearchPolicy {
        sort_by: SortKey::Size,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };

    let result = harness
        .service
        .search("tt0133093", MediaKind::Movie, &policy)
        .await
        .unwrap();

    let sizes: Vec<&str> = result.results.iter().map(|c| c.size.as_str()).collect();
    assert_eq!(
        sizes,
        vec!["700 MB", "1.46 GB", "4.37 GB", "14.5 GB", "58.1 GB"]
    );
}

#[tokio::test]
async fn test_group_by_quality_preserves_sorted_order() {
    let harness = TestHarness::with_rows(&movie_rows()).await;
    let policy = SearchPolicy {
        group_by_quality: true,
        ..Default::default()
    };

    let result = harness
        .service
        .search("tt0133093", MediaKind::Movie, &policy)
        .await
        .unwrap();

    let groups = result.groups.as_ref().unwrap();
    assert_eq!(
        groups.keys().collect::<Vec<_>>(),
        vec!["Unknown", "1080P", "720P", "4K", "480P"]
    );
    let grouped: usize = groups.iter().map(|(_, members)| members.len()).sum();
    assert_eq!(grouped, result.total);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["groups"]["4K"][0]["hdr"], true);
    assert_eq!(json["groups"]["4K"][0]["hevc"], true);
}

#[tokio::test]
async fn test_series_season_filter_and_grouping() {
    let harness = TestHarness::with_rows(&series_rows()).await;
    let policy = SearchPolicy {
        season: Some(2),
        group_by_season: true,
        ..Default::default()
    };

    let result = harness
        .service
        .search("tt0903747", MediaKind::Series, &policy)
        .await
        .unwrap();

    assert_eq!(result.query, "Breaking Bad (2008)");
    assert_eq!(
        titles(&result),
        vec![
            "Breaking Bad S02 720p",
            "Breaking Bad Complete Series 1080p",
            "Breaking Bad (Сезон: 2) 1080p",
        ]
    );
    let groups = result.groups.unwrap();
    assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["S02", "unspecified"]);
    assert_eq!(groups.get("S02").unwrap().len(), 2);
}

#[tokio::test]
async fn test_season_options_ignored_for_movies() {
    let harness = TestHarness::with_rows(&movie_rows()).await;
    let policy = SearchPolicy {
        season: Some(3),
        group_by_season: true,
        ..Default::default()
    };

    let result = harness
        .service
        .search("tt0133093", MediaKind::Movie, &policy)
        .await
        .unwrap();

    assert_eq!(result.total, 5);
    assert!(result.groups.is_none());
}

#[tokio::test]
async fn test_no_survivors_is_empty_result() {
    let harness = TestHarness::with_rows(&movie_rows()).await;
    let policy = SearchPolicy {
        exclude_qualities: [
            QualityTier::P480,
            QualityTier::P720,
            QualityTier::P1080,
            QualityTier::FourK,
            QualityTier::Unknown,
        ]
        .into_iter()
        .collect(),
        ..Default::default()
    };

    let result = harness
        .service
        .search("tt0133093", MediaKind::Movie, &policy)
        .await
        .unwrap();

    assert_eq!(result.total, 0);
    assert!(result.results.is_empty());
    assert_eq!(result.query, "The Matrix (1999)");
}

#[tokio::test]
async fn test_page_without_rows() {
    let harness = TestHarness::new().await;
    harness
        .source
        .set_document("<html><body>Nothing found</body></html>")
        .await;

    let result = harness
        .service
        .search("tt0133093", MediaKind::Movie, &SearchPolicy::default())
        .await
        .unwrap();
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn test_resolution_failure_skips_fetch() {
    let harness = TestHarness::with_rows(&movie_rows()).await;
    harness
        .catalog
        .set_next_error(ExternalCatalogError::ApiError {
            status: 500,
            message: "boom".to_string(),
        })
        .await;

    let err = harness
        .service
        .search("tt0133093", MediaKind::Movie, &SearchPolicy::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Resolution(_)));
    assert_eq!(harness.source.fetch_count().await, 0);
}

#[tokio::test]
async fn test_fetch_failure() {
    let harness = TestHarness::with_rows(&movie_rows()).await;
    harness
        .source
        .set_next_error(SearchError::Fetch("HTTP 502 Bad Gateway".to_string()))
        .await;

    let err = harness
        .service
        .search("tt0133093", MediaKind::Movie, &SearchPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Fetch(_)));
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let harness = TestHarness::with_rows(&movie_rows()).await;
    harness.source.set_delay(Duration::from_secs(30)).await;
    let service = SearchService::new(harness.catalog.clone(), harness.source.clone())
        .with_timeout(Some(Duration::from_millis(100)));

    let err = service
        .search("tt0133093", MediaKind::Movie, &SearchPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Timeout(_)));
}
