//! Category label normalization
//!
//! Scraped category cells look like `"Very High Risk • Small Cap • 5★"`: a
//! bullet-separated list where the category sits in the middle. This module
//! picks the category token, cleans it, and maps it onto a small canonical
//! vocabulary.
//!
//! Global invariants enforced:
//! - Output is never empty: absent or blank labels become "Unknown"
//! - The positional token rule lives only in `select_label_token`

use crate::record::RawValue;
use regex::Regex;
use std::sync::OnceLock;

/// Category used when the source gives nothing usable
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Bullet separators: the real glyph and its escaped text form
const SEPARATORS: &[&str] = &["\u{2022}", "\\u2022"];

/// Cleaned lookup key -> canonical category
const CANONICAL_CATEGORIES: &[(&str, &str)] = &[
    ("equity", "Equity"),
    ("equity - large cap", "Equity"),
    ("equity - mid cap", "Equity"),
    ("small cap", "Equity"),
    ("mid cap", "Equity"),
    ("hybrid", "Hybrid"),
    ("debt", "Debt"),
    ("commodities", "Commodities"),
    ("gold", "Commodities"),
    ("liquid", "Debt"),
    ("tax saver", "Equity"),
];

/// Result of normalizing one category cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCategory {
    /// Canonical category (mapped value or title-cased fallback)
    pub category: String,
    /// The selected label token before mapping; empty when there was none
    pub label: String,
}

impl NormalizedCategory {
    fn unknown() -> Self {
        NormalizedCategory {
            category: UNKNOWN_CATEGORY.to_string(),
            label: String::new(),
        }
    }
}

/// Normalize a raw category cell
pub fn normalize_category(raw: Option<&RawValue>) -> NormalizedCategory {
    let text = match raw {
        Some(value) => value.as_text(),
        None => return NormalizedCategory::unknown(),
    };

    let tokens = split_label(&text);
    let token = match select_label_token(&tokens) {
        Some(token) => token,
        None => return NormalizedCategory::unknown(),
    };

    let category = lookup_canonical(&lookup_key(token))
        .map(str::to_string)
        .unwrap_or_else(|| title_case(token));

    NormalizedCategory {
        category,
        label: token.to_string(),
    }
}

/// Split a label on bullet separators, dropping blank pieces
pub fn split_label(text: &str) -> Vec<&str> {
    let mut pieces = vec![text];
    for separator in SEPARATORS {
        pieces = pieces
            .into_iter()
            .flat_map(|piece| piece.split(separator))
            .collect();
    }
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Pick the token that carries the category.
///
/// Tied to the source site's `risk • category • rating` layout: a lone token
/// is the category, otherwise the category is the second token.
pub fn select_label_token<'a>(tokens: &[&'a str]) -> Option<&'a str> {
    match tokens {
        [] => None,
        [only] => Some(*only),
        [_, second, ..] => Some(*second),
    }
}

/// Reduce a label token to its mapping-table key
fn lookup_key(token: &str) -> String {
    static FILLER_RE: OnceLock<Regex> = OnceLock::new();
    let filler_re = FILLER_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(fund|direct plan|growth|plan)\b").expect("filler pattern is valid")
    });

    let lowered = token.to_lowercase();
    let without_filler = filler_re.replace_all(&lowered, "");
    let kept: String = without_filler
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == '-' || c == ' ')
        .to_string()
}

fn lookup_canonical(key: &str) -> Option<&'static str> {
    CANONICAL_CATEGORIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, canonical)| *canonical)
}

/// Capitalize every letter that follows a non-letter, lowercase the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
