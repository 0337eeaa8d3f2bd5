//! Optional partitioning of sorted results by quality tier and/or season.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::types::{CandidateGroups, MediaKind, TorrentCandidate};

/// Group key for series releases whose season cannot be detected.
pub const UNSPECIFIED_SEASON: &str = "unspecified";

/// Season markers, checked in order. Cyrillic letters are spelled out in both
/// cases since case-insensitive matching only folds ASCII.
static SEASON_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bS(\d{1,2})(?:E\d{1,3})?\b",
        r"(?i)\bseason\s*(\d{1,2})\b",
        r"\b(\d{1,2})\s*[Сс][Ее][Зз][Оо][Нн]",
        r"[Сс][Ее][Зз][Оо][Нн]\s*:?\s*(\d{1,2})\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Detect the season number mentioned in a release title.
pub fn detect_season(title: &str) -> Option<u32> {
    SEASON_PATTERNS.iter().find_map(|re| {
        re.captures(title)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

fn season_key(title: &str) -> String {
    match detect_season(title) {
        Some(season) => format!("S{:02}", season),
        None => UNSPECIFIED_SEASON.to_string(),
    }
}

/// Partition candidates into groups, preserving their order within each group.
///
/// Season grouping only applies to series. Returns `None` when no grouping
/// is in effect.
pub fn group_candidates(
    candidates: &[TorrentCandidate],
    by_quality: bool,
    by_season: bool,
    kind: MediaKind,
) -> Option<CandidateGroups> {
    let by_season = by_season && kind.is_series();
    if !by_quality && !by_season {
        return None;
    }

    let mut groups = CandidateGroups::default();
    for candidate in candidates {
        let key = match (by_quality, by_season) {
            (true, true) => format!("{}/{}", candidate.quality, season_key(&candidate.title)),
            (true, false) => candidate.quality.to_string(),
            _ => season_key(&candidate.title),
        };
        groups.push(key, candidate.clone());
    }
    Some(groups)
}
