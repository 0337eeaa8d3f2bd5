//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external service traits,
//! allowing the whole search pipeline to run without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelscout_core::testing::{fixtures, MockExternalCatalog, MockSourceFetcher};
//!
//! let catalog = MockExternalCatalog::new();
//! catalog.add_movie("tt0133093", fixtures::tmdb_movie("The Matrix", 1999)).await;
//!
//! let source = MockSourceFetcher::new();
//! source.set_document(fixtures::html_page(&[
//!     fixtures::html_row("The Matrix 1999 1080p", "14 GB", 40, 5),
//! ])).await;
//!
//! // Use in SearchService::new(...)
//! ```

mod mock_external_catalog;
mod mock_source;

pub use mock_external_catalog::MockExternalCatalog;
pub use mock_source::MockSourceFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::external_catalog::{TmdbMovie, TmdbSeries};
    use crate::searcher::{classify, TorrentCandidate};

    /// Create a classified candidate with the given title and seeders.
    pub fn candidate(title: &str, seeders: u32) -> TorrentCandidate {
        let class = classify(title);
        TorrentCandidate {
            title: title.to_string(),
            size: "1.5 GB".to_string(),
            seeders,
            leechers: seeders / 4,
            quality: class.quality,
            hdr: class.hdr,
            hevc: class.hevc,
            magnet_link: format!("magnet:?xt=urn:btih:{:040x}", title.len()),
            ..Default::default()
        }
    }

    /// Create a test TMDB movie.
    pub fn tmdb_movie(title: &str, year: u32) -> TmdbMovie {
        TmdbMovie {
            id: (year * 100 + title.len() as u32) % 100000,
            title: title.to_string(),
            original_title: None,
            release_date: Some(format!("{}-06-15", year)),
        }
    }

    /// Create a test TMDB TV series.
    pub fn tmdb_series(name: &str, first_year: u32) -> TmdbSeries {
        TmdbSeries {
            id: (name.len() as u32 * 1000) % 100000,
            name: name.to_string(),
            original_name: None,
            first_air_date: Some(format!("{}-01-20", first_year)),
        }
    }

    /// One result row as rendered by the search surface.
    pub fn html_row(title: &str, size: &str, seeders: u32, leechers: u32) -> String {
        format!(
            r#"<tr>
  <td class="name"><a href="/details.php?id={id}">{title}</a></td>
  <td class="size">{size}</td>
  <td><span class="seed">{seeders}</span></td>
  <td><span class="leech">{leechers}</span></td>
  <td><a href="magnet:?xt=urn:btih:{id:040x}&amp;dn=release">magnet</a></td>
  <td><a href="/download.php?id={id}">download</a></td>
</tr>"#,
            id = title.len() * 7 + seeders as usize,
        )
    }

    /// Wrap rows in a search results page, with a header row that carries no title.
    pub fn html_page(rows: &[String]) -> String {
        format!(
            "<html><body><table class=\"results\">\n<tr><th>Name</th><th>Size</th><th>S</th><th>L</th></tr>\n{}\n</table></body></html>",
            rows.join("\n")
        )
    }
}
