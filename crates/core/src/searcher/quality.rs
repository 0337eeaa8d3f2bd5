//! Quality classification of release titles.
//!
//! Resolution is inferred from free-text title tokens. The rules are an
//! ordered table scanned from highest to lowest resolution; the first token
//! contained in the uppercased title decides the tier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Video resolution tier.
///
/// Ranked tiers are ordered from `P360` to `FourK`. `Unknown` carries no rank:
/// it never satisfies a min/max bound but still forms its own group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    #[serde(rename = "360P")]
    P360,
    #[serde(rename = "480P")]
    P480,
    #[serde(rename = "720P")]
    P720,
    #[serde(rename = "1080P")]
    P1080,
    #[serde(rename = "1440P")]
    P1440,
    #[serde(rename = "4K")]
    FourK,
    #[default]
    Unknown,
}

impl QualityTier {
    /// Position on the resolution scale, `None` for `Unknown`.
    pub fn rank(self) -> Option<u8> {
        match self {
            Self::P360 => Some(1),
            Self::P480 => Some(2),
            Self::P720 => Some(3),
            Self::P1080 => Some(4),
            Self::P1440 => Some(5),
            Self::FourK => Some(6),
            Self::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::P360 => "360P",
            Self::P480 => "480P",
            Self::P720 => "720P",
            Self::P1080 => "1080P",
            Self::P1440 => "1440P",
            Self::FourK => "4K",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a tier name as supplied by callers (`1080p`, `4K`, `2160p`, `unknown`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "360P" => Some(Self::P360),
            "480P" => Some(Self::P480),
            "720P" => Some(Self::P720),
            "1080P" => Some(Self::P1080),
            "1440P" => Some(Self::P1440),
            "2160P" | "4K" => Some(Self::FourK),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// True if this tier ranks at or above `bound`. Unranked tiers never pass.
    pub fn at_least(self, bound: QualityTier) -> bool {
        matches!((self.rank(), bound.rank()), (Some(r), Some(b)) if r >= b)
    }

    /// True if this tier ranks at or below `bound`. Unranked tiers never pass.
    pub fn at_most(self, bound: QualityTier) -> bool {
        matches!((self.rank(), bound.rank()), (Some(r), Some(b)) if r <= b)
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution tokens, highest first. `2160P` is folded into `4K`.
const QUALITY_RULES: &[(&str, QualityTier)] = &[
    ("2160P", QualityTier::FourK),
    ("4K", QualityTier::FourK),
    ("1440P", QualityTier::P1440),
    ("1080P", QualityTier::P1080),
    ("720P", QualityTier::P720),
    ("480P", QualityTier::P480),
    ("360P", QualityTier::P360),
];

const HDR_TOKENS: &[&str] = &["HDR"];

// x265 is a common shorthand but is deliberately not matched.
const HEVC_TOKENS: &[&str] = &["HEVC", "H.265"];

/// Output of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub quality: QualityTier,
    pub hdr: bool,
    pub hevc: bool,
}

/// Classify a release title by resolution, HDR and HEVC markers.
pub fn classify(title: &str) -> Classification {
    let normalized = title.to_uppercase();
    let contains_any = |tokens: &[&str]| tokens.iter().any(|t| normalized.contains(t));

    let quality = QUALITY_RULES
        .iter()
        .find(|(token, _)| normalized.contains(token))
        .map(|(_, tier)| *tier)
        .unwrap_or(QualityTier::Unknown);

    Classification {
        quality,
        hdr: contains_any(HDR_TOKENS),
        hevc: contains_any(HEVC_TOKENS),
    }
}
