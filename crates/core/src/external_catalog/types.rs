//! Types for external catalog API responses.

use serde::{Deserialize, Serialize};

/// A TMDB movie, as returned in `movie_results`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TmdbMovie {
    /// TMDB movie ID.
    pub id: u32,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title (in original language).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl TmdbMovie {
    /// Original title if present, localized title otherwise.
    pub fn preferred_title(&self) -> Option<&str> {
        preferred(self.original_title.as_deref(), &self.title)
    }

    /// First four characters of the release date, or empty.
    pub fn year(&self) -> String {
        year_prefix(self.release_date.as_deref())
    }
}

/// A TMDB TV series, as returned in `tv_results`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TmdbSeries {
    /// TMDB series ID.
    pub id: u32,
    /// Localized name.
    #[serde(default)]
    pub name: String,
    /// Original name (in original language).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// First air date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
}

impl TmdbSeries {
    /// Original name if present, localized name otherwise.
    pub fn preferred_title(&self) -> Option<&str> {
        preferred(self.original_name.as_deref(), &self.name)
    }

    /// First four characters of the first air date, or empty.
    pub fn year(&self) -> String {
        year_prefix(self.first_air_date.as_deref())
    }
}

/// Result of a lookup by external id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FindResult {
    #[serde(default)]
    pub movie_results: Vec<TmdbMovie>,
    #[serde(default)]
    pub tv_results: Vec<TmdbSeries>,
}

fn preferred<'a>(original: Option<&'a str>, localized: &'a str) -> Option<&'a str> {
    original
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| Some(localized.trim()).filter(|t| !t.is_empty()))
}

fn year_prefix(date: Option<&str>) -> String {
    match date {
        Some(d) if d.chars().count() >= 4 => d.chars().take(4).collect(),
        _ => String::new(),
    }
}
