//! Final result packaging.

use super::types::{CandidateGroups, ResolvedMedia, ResultSet, TorrentCandidate};

/// Package filtered, sorted results with the query echo and count.
pub fn assemble(
    media: &ResolvedMedia,
    results: Vec<TorrentCandidate>,
    groups: Option<CandidateGroups>,
) -> ResultSet {
    ResultSet {
        query: media.display_name(),
        total: results.len(),
        results,
        groups,
    }
}
