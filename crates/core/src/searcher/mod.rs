//! Release search pipeline.
//!
//! A search runs these stages in order:
//! resolve the IMDb id to a title, fetch the tracker's search page, extract
//! candidate rows, classify each by quality, then filter, sort and
//! optionally group according to the caller's [`SearchPolicy`].

mod assembler;
mod extractor;
mod filter;
mod grouping;
mod http_source;
mod quality;
mod resolver;
mod service;
mod sort;
mod types;

pub use assembler::assemble;
pub use extractor::{extract_candidates, extract_row};
pub use filter::{filter_candidates, matches_policy};
pub use grouping::{detect_season, group_candidates, UNSPECIFIED_SEASON};
pub use http_source::{build_search_query, HttpSourceFetcher};
pub use quality::{classify, Classification, QualityTier};
pub use resolver::{select_media, TitleResolver};
pub use service::{rank_candidates, SearchService};
pub use sort::{parse_size_bytes, sort_candidates};
pub use types::*;
