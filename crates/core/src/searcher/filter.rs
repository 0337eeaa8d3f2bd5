//! Policy-based candidate filtering.

use super::grouping::detect_season;
use super::types::{MediaKind, SearchPolicy, TorrentCandidate};

/// Keep the candidates that satisfy every predicate of `policy`, in input order.
pub fn filter_candidates(
    candidates: Vec<TorrentCandidate>,
    policy: &SearchPolicy,
    kind: MediaKind,
) -> Vec<TorrentCandidate> {
    candidates
        .into_iter()
        .filter(|c| matches_policy(c, policy, kind))
        .collect()
}

/// Check a single candidate against the policy.
pub fn matches_policy(candidate: &TorrentCandidate, policy: &SearchPolicy, kind: MediaKind) -> bool {
    let quality = candidate.quality;

    if !policy.qualities.is_empty() && !policy.qualities.contains(&quality) {
        return false;
    }
    if let Some(min) = policy.min_quality {
        if !quality.at_least(min) {
            return false;
        }
    }
    if let Some(max) = policy.max_quality {
        if !quality.at_most(max) {
            return false;
        }
    }
    if policy.exclude_qualities.contains(&quality) {
        return false;
    }
    if policy.hdr.is_some_and(|hdr| hdr != candidate.hdr) {
        return false;
    }
    if policy.hevc.is_some_and(|hevc| hevc != candidate.hevc) {
        return false;
    }

    // Releases without a season marker are kept.
    match (kind, policy.season) {
        (MediaKind::Series, Some(wanted)) => {
            detect_season(&candidate.title).is_none_or(|found| found == wanted)
        }
        _ => true,
    }
}
