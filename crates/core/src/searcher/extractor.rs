//! Candidate extraction from search result pages.
//!
//! The search surface returns an HTML table; each `<tr>` is treated as one
//! candidate. Rows are parsed independently and best-effort: a field that
//! cannot be found is left at its zero value, and a row without a title is
//! dropped.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::quality::classify;
use super::types::{RawDocument, TorrentCandidate};

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static MAGNET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href^='magnet:']").unwrap());
static SEED_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("[class^='seed']").unwrap());
static LEECH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[class^='leech']").unwrap());

/// A number with optional thousands grouping or decimal part, then a unit.
static SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:[.,]\d+)?)\s*((?:[KMGTPEКкМмГгТт]i?)?[BБб])",
    )
    .unwrap()
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(\d{4})-(\d{2})-(\d{2})|(\d{2})\.(\d{2})\.(\d{4}))\b").unwrap()
});

/// Extract all candidates from a raw search page. Never fails.
pub fn extract_candidates(document: &RawDocument) -> Vec<TorrentCandidate> {
    let html = Html::parse_document(document.as_str());
    let candidates: Vec<TorrentCandidate> = html
        .select(&ROW_SELECTOR)
        .filter_map(candidate_from_row)
        .collect();

    debug!(
        document_bytes = document.len(),
        candidates = candidates.len(),
        "Extracted candidates"
    );

    candidates
}

/// Parse one `<tr>` fragment. Returns `None` when no title can be found.
pub fn extract_row(row: &str) -> Option<TorrentCandidate> {
    // Table rows are only kept by the parser inside a table.
    let fragment = Html::parse_fragment(&format!("<table>{}</table>", row));
    let row = fragment.select(&ROW_SELECTOR).next()?;
    candidate_from_row(row)
}

fn candidate_from_row(row: ElementRef<'_>) -> Option<TorrentCandidate> {
    let title = extract_title(row)?;
    let class = classify(&title);

    Some(TorrentCandidate {
        size: row
            .select(&CELL_SELECTOR)
            .find_map(|cell| extract_size(&element_text(cell)))
            .unwrap_or_default(),
        seeders: extract_count(row, &SEED_SELECTOR),
        leechers: extract_count(row, &LEECH_SELECTOR),
        quality: class.quality,
        hdr: class.hdr,
        hevc: class.hevc,
        magnet_link: row
            .select(&MAGNET_SELECTOR)
            .find_map(|a| a.value().attr("href"))
            .unwrap_or_default()
            .to_string(),
        torrent_link: row
            .select(&LINK_SELECTOR)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| is_torrent_link(href))
            .unwrap_or_default()
            .to_string(),
        added_date: row.text().find_map(extract_date).unwrap_or_default(),
        title,
    })
}

/// Text content with whitespace runs (including `&nbsp;`) collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_title(row: ElementRef<'_>) -> Option<String> {
    row.select(&LINK_SELECTOR)
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn extract_size(text: &str) -> Option<String> {
    SIZE_RE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        // Reject unit prefixes of longer words ("5 Bytes", "2 Broke").
        if text[whole.end()..]
            .chars()
            .next()
            .is_some_and(char::is_alphabetic)
        {
            return None;
        }
        Some(format!("{} {}", &caps[1], &caps[2]))
    })
}

fn extract_count(row: ElementRef<'_>, selector: &Selector) -> u32 {
    row.select(selector)
        .next()
        .map(element_text)
        .and_then(|text| {
            let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .unwrap_or(0)
}

fn is_torrent_link(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    if lower.starts_with("magnet:") {
        return false;
    }
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    path.ends_with(".torrent") || path.rsplit('/').next().is_some_and(|f| f.starts_with("download"))
}

fn extract_date(text: &str) -> Option<String> {
    DATE_RE.captures_iter(text).find_map(|caps| {
        let (y, m, d) = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(y), Some(m), Some(d)) => (y.as_str(), m.as_str(), d.as_str()),
            _ => (caps.get(6)?.as_str(), caps.get(5)?.as_str(), caps.get(4)?.as_str()),
        };
        let date = NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)?;
        Some(date.format("%Y-%m-%d").to_string())
    })
}
