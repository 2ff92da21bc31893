//! Category-based risk classification
//!
//! Global invariants enforced:
//! - Rules are evaluated in table order; the first match wins
//! - Matching is case-insensitive substring search
//! - Classification is total: unmatched text is `Unknown`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very High Risk")]
    VeryHigh,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Moderately High Risk")]
    ModeratelyHigh,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "Low Risk")]
    Low,
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::VeryHigh => "Very High Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::ModeratelyHigh => "Moderately High Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::Low => "Low Risk",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification rule: any needle present in the text selects `level`
#[derive(Debug)]
pub struct RiskRule {
    pub needles: &'static [&'static str],
    pub level: RiskLevel,
}

impl RiskRule {
    fn matches(&self, lowered: &str) -> bool {
        self.needles.iter().any(|needle| lowered.contains(needle))
    }
}

/// Ordered rule table.
///
/// Order matters: "small cap" must beat the generic "equity" bucket, and
/// "mid cap" must be checked before "large cap" so "Large & Mid Cap" lands
/// in the higher bucket.
pub static RISK_RULES: &[RiskRule] = &[
    RiskRule {
        needles: &["small cap", "sectoral", "thematic"],
        level: RiskLevel::VeryHigh,
    },
    RiskRule {
        needles: &["mid cap", "flexi cap", "multi cap"],
        level: RiskLevel::High,
    },
    RiskRule {
        needles: &["large cap"],
        level: RiskLevel::ModeratelyHigh,
    },
    RiskRule {
        needles: &["hybrid", "balanced advantage"],
        level: RiskLevel::Moderate,
    },
    RiskRule {
        needles: &["debt", "liquid", "money market"],
        level: RiskLevel::Low,
    },
    // Generic equity/commodity labels
    RiskRule {
        needles: &["equity", "commodities"],
        level: RiskLevel::VeryHigh,
    },
];

/// Classify category text into a risk bucket
pub fn classify_risk(category: &str) -> RiskLevel {
    let lowered = category.to_lowercase();
    RISK_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.level)
        .unwrap_or(RiskLevel::Unknown)
}
